use std::error::Error;

use chrono::NaiveDate;
use hotelier::{
    domain::{
        core::{Customer, Hotel, RoomNumber},
        Entity,
    },
    infrastructure::core::JsonFileRecordStore,
    HotelierConfig,
};
use tracing::{error, info, warn, Level};

fn main() {
    match HotelierConfig::load() {
        Ok(config) => {
            tracing_subscriber::fmt()
                .with_max_level(Level::from(&config.logger.level))
                .init();
            if let Err(error) = run(&config) {
                error!("アプリケーションエラー: {}", error);
            }
        }
        Err(error) => {
            tracing_subscriber::fmt::init();
            error!("アプリケーションエラー: {}", error)
        }
    }
}

fn run(config: &HotelierConfig) -> Result<(), Box<dyn Error>> {
    let mut store = JsonFileRecordStore::open(&config.store.directory)?;
    info!("保存先: {}", store.directory().display());

    let hotel = Hotel::create(
        "Grand Hotel".to_owned(),
        "New York".to_owned(),
        (101..=105).map(RoomNumber::from).collect(),
    );
    hotel.save(&mut store)?;
    let Some(mut hotel) = Hotel::find_by_name(&store, hotel.name()) else {
        warn!("ホテルを読み込めませんでした");
        return Ok(());
    };
    println!("{}", hotel);

    let customer = Customer::create("John Doe".to_owned(), "john.doe@example.com".to_owned());
    customer.save(&mut store)?;
    let Some(customer) = Customer::find_by_name(&store, customer.name()) else {
        warn!("顧客を読み込めませんでした");
        return Ok(());
    };
    println!("{}", customer);

    let check_in = NaiveDate::from_ymd_opt(2025, 3, 1).ok_or("invalid check-in date")?;
    let check_out = NaiveDate::from_ymd_opt(2025, 3, 5).ok_or("invalid check-out date")?;
    let room = RoomNumber::from(101);
    match hotel.make_reservation(&mut store, &customer, room, check_in, check_out)? {
        Some(reservation) => {
            println!(
                "Reservation successful for {} in room {}",
                reservation.customer().name(),
                reservation.room_number()
            );
            if hotel.cancel_reservation(&mut store, &reservation)? {
                println!("Reservation cancelled");
            }
        }
        None => println!("Reservation failed"),
    }
    Ok(())
}
