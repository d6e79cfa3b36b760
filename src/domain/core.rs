mod customer;
mod hotel;
mod reservation;

use derive_more::{Deref, Display, From};
use serde::{Deserialize, Serialize};

pub use self::customer::*;
pub use self::hotel::*;
pub use self::reservation::*;

/// 部屋番号
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, From,
    Deref,
)]
pub struct RoomNumber(u32);
