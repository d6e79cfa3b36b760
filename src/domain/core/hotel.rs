use std::{fmt, mem, ops::Range};

use chrono::NaiveDate;
use derive_more::{Display, Error, From};
use serde_json::Value;
use tracing::debug;

use crate::domain::{DataAccessError, Entity, Record, RecordStore};

use super::{Customer, Reservation, RoomNumber};

/// ホテルエンティティ。予約の作成と取消はホテルを通してのみ行う
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Hotel {
    name: String,
    location: String,
    rooms: Vec<RoomNumber>,
    reservations: Vec<Reservation>,
}

impl Hotel {
    pub fn create(name: String, location: String, rooms: Vec<RoomNumber>) -> Self {
        Self {
            name,
            location,
            rooms,
            reservations: Vec::new(),
        }
    }

    /// 部屋を予約して保存する
    ///
    /// 部屋が存在しない場合や既存の予約と期間が重なる場合は`Ok(None)`を返し、状態は変更しない。
    /// 保存に失敗した場合は追加した予約を取り消してエラーを返す。
    pub fn make_reservation<S: RecordStore + ?Sized>(
        &mut self,
        store: &mut S,
        customer: &Customer,
        room_number: RoomNumber,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Option<Reservation>, HotelError> {
        if !self.rooms.contains(&room_number) {
            return Ok(None);
        }
        let stay = check_in..check_out;
        Self::validate_stay(&stay)?;
        if self.is_reserved(room_number, &stay) {
            return Ok(None);
        }
        let reservation = Reservation::new(customer.clone(), room_number, stay);
        self.reservations.push(reservation.clone());
        if let Err(e) = self.save(store) {
            self.reservations.pop();
            return Err(e.into());
        }
        debug!(
            hotel = %self.name,
            room = %room_number,
            %check_in,
            %check_out,
            "予約を作成しました"
        );
        Ok(Some(reservation))
    }

    /// 指定した期間に部屋が予約済みかどうか
    pub fn is_room_reserved(
        &self,
        room_number: RoomNumber,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> bool {
        self.is_reserved(room_number, &(check_in..check_out))
    }

    /// 予約を取り消して保存する。該当する予約がなければ何もせず`Ok(false)`を返す
    pub fn cancel_reservation<S: RecordStore + ?Sized>(
        &mut self,
        store: &mut S,
        reservation: &Reservation,
    ) -> Result<bool, DataAccessError> {
        let Some(index) = self.reservations.iter().position(|r| r == reservation) else {
            return Ok(false);
        };
        let removed = self.reservations.remove(index);
        if let Err(e) = self.save(store) {
            self.reservations.insert(index, removed);
            return Err(e);
        }
        debug!(hotel = %self.name, room = %removed.room_number(), "予約を取り消しました");
        Ok(true)
    }

    /// ホテル情報を変更して保存する。`None`や空の項目は変更しない
    ///
    /// 部屋を変更しても既存の予約は再検証しない。
    pub fn modify_info<S: RecordStore + ?Sized>(
        &mut self,
        store: &mut S,
        name: Option<String>,
        location: Option<String>,
        rooms: Option<Vec<RoomNumber>>,
    ) -> Result<(), DataAccessError> {
        let mut name = name.filter(|s| !s.is_empty());
        let mut location = location.filter(|s| !s.is_empty());
        let mut rooms = rooms.filter(|r| !r.is_empty());
        self.swap_info(&mut name, &mut location, &mut rooms);
        if let Err(e) = self.save(store) {
            self.swap_info(&mut name, &mut location, &mut rooms);
            return Err(e);
        }
        debug!(hotel = %self.name, "ホテル情報を変更しました");
        Ok(())
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn rooms(&self) -> &[RoomNumber] {
        &self.rooms
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    fn is_reserved(&self, room_number: RoomNumber, stay: &Range<NaiveDate>) -> bool {
        self.reservations
            .iter()
            .any(|r| r.overlaps(room_number, stay))
    }

    fn swap_info(
        &mut self,
        name: &mut Option<String>,
        location: &mut Option<String>,
        rooms: &mut Option<Vec<RoomNumber>>,
    ) {
        if let Some(name) = name {
            mem::swap(&mut self.name, name);
        }
        if let Some(location) = location {
            mem::swap(&mut self.location, location);
        }
        if let Some(rooms) = rooms {
            mem::swap(&mut self.rooms, rooms);
        }
    }

    fn validate_stay(stay: &Range<NaiveDate>) -> Result<(), HotelError> {
        if stay.start >= stay.end {
            return Err(HotelError::InvalidStay);
        }
        Ok(())
    }
}

impl Entity for Hotel {
    const ENTITY_NAME: &'static str = "hotel";

    fn name(&self) -> &str {
        &self.name
    }

    fn to_record(&self) -> Record {
        Record::new()
            .with("name", self.name.as_str())
            .with("location", self.location.as_str())
            .with(
                "rooms",
                self.rooms.iter().map(|r| Value::from(**r)).collect::<Vec<_>>(),
            )
            .with(
                "reservations",
                self.reservations
                    .iter()
                    .map(|r| Value::from(r.to_record()))
                    .collect::<Vec<_>>(),
            )
    }

    fn from_record(record: &Record) -> Result<Self, DataAccessError> {
        let mut entity = Self::create(
            record.field("name")?,
            record.field("location")?,
            record.field("rooms")?,
        );
        entity.reservations = record
            .field::<Vec<Record>>("reservations")?
            .iter()
            .map(Reservation::from_record)
            .collect::<Result<_, _>>()?;
        Ok(entity)
    }
}

impl fmt::Display for Hotel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rooms = self
            .rooms
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "Hotel Name: {}", self.name)?;
        writeln!(f, "Location: {}", self.location)?;
        writeln!(f, "Rooms: [{}]", rooms)?;
        write!(f, "Reservations: {}", self.reservations.len())
    }
}

/// ホテルエラー
#[derive(Error, Display, Debug, From)]
pub enum HotelError {
    /// チェックアウト日がチェックイン日以前です
    #[display(fmt = "Check-out must be after check-in")]
    InvalidStay,
    /// 保存に失敗しました
    #[display(fmt = "Data access error: {}", _0)]
    DataAccess(#[error(source)] DataAccessError),
}
