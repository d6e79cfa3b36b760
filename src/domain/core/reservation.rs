use std::ops::Range;

use chrono::NaiveDate;
use serde_json::Value;

use crate::domain::{DataAccessError, Entity, Record};

use super::{Customer, RoomNumber};

/// 予約。予約時点の顧客情報を保持する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    customer: Customer,
    room_number: RoomNumber,
    stay: Range<NaiveDate>,
}

impl Reservation {
    pub(crate) fn new(customer: Customer, room_number: RoomNumber, stay: Range<NaiveDate>) -> Self {
        Self {
            customer,
            room_number,
            stay,
        }
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn room_number(&self) -> RoomNumber {
        self.room_number
    }

    pub fn check_in(&self) -> NaiveDate {
        self.stay.start
    }

    pub fn check_out(&self) -> NaiveDate {
        self.stay.end
    }

    /// 同じ部屋で宿泊期間が重なるかどうか。チェックアウト日は期間に含まない
    pub fn overlaps(&self, room_number: RoomNumber, stay: &Range<NaiveDate>) -> bool {
        self.room_number == room_number
            && !(stay.end <= self.stay.start || stay.start >= self.stay.end)
    }

    pub fn to_record(&self) -> Record {
        Record::new()
            .with("customer", self.customer.to_record())
            .with("room_number", Value::from(*self.room_number))
            .with("check_in", self.stay.start.to_string())
            .with("check_out", self.stay.end.to_string())
    }

    pub fn from_record(record: &Record) -> Result<Self, DataAccessError> {
        let customer = Customer::from_record(&record.field::<Record>("customer")?)?;
        Ok(Self::new(
            customer,
            record.field("room_number")?,
            record.field("check_in")?..record.field("check_out")?,
        ))
    }
}
