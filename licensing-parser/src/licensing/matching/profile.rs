//! Business profile
//!
//! The matcher's only input besides the forest. All five fields are required; a
//! profile is validated once, at construction or deserialization, and is immutable
//! afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("area must be a finite number, got {0}")]
    NonFiniteArea(f64),
    #[error("area must not be negative, got {0}")]
    NegativeArea(f64),
    #[error("seat count must not be negative, got {0}")]
    NegativeSeatCount(i64),
    #[error("seat count {0} is out of range")]
    SeatCountOutOfRange(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProfileRecord", into = "ProfileRecord")]
pub struct BusinessProfile {
    area: f64,
    seat_count: u32,
    uses_gas: bool,
    serves_meat: bool,
    offers_delivery: bool,
}

impl BusinessProfile {
    pub fn new(
        area: f64,
        seat_count: i64,
        uses_gas: bool,
        serves_meat: bool,
        offers_delivery: bool,
    ) -> Result<Self, ProfileError> {
        if !area.is_finite() {
            return Err(ProfileError::NonFiniteArea(area));
        }
        if area < 0.0 {
            return Err(ProfileError::NegativeArea(area));
        }
        if seat_count < 0 {
            return Err(ProfileError::NegativeSeatCount(seat_count));
        }
        let seat_count =
            u32::try_from(seat_count).map_err(|_| ProfileError::SeatCountOutOfRange(seat_count))?;
        Ok(BusinessProfile {
            area,
            seat_count,
            uses_gas,
            serves_meat,
            offers_delivery,
        })
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn seat_count(&self) -> u32 {
        self.seat_count
    }

    pub fn uses_gas(&self) -> bool {
        self.uses_gas
    }

    pub fn serves_meat(&self) -> bool {
        self.serves_meat
    }

    pub fn offers_delivery(&self) -> bool {
        self.offers_delivery
    }
}

/// Wire shape: camelCase, with the snake_case names of the legacy API accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileRecord {
    #[serde(alias = "area_sqm")]
    area: f64,
    #[serde(alias = "seats", alias = "seat_count")]
    seat_count: i64,
    #[serde(alias = "uses_gas")]
    uses_gas: bool,
    #[serde(alias = "serves_meat")]
    serves_meat: bool,
    #[serde(alias = "offers_delivery")]
    offers_delivery: bool,
}

impl TryFrom<ProfileRecord> for BusinessProfile {
    type Error = ProfileError;

    fn try_from(record: ProfileRecord) -> Result<Self, Self::Error> {
        BusinessProfile::new(
            record.area,
            record.seat_count,
            record.uses_gas,
            record.serves_meat,
            record.offers_delivery,
        )
    }
}

impl From<BusinessProfile> for ProfileRecord {
    fn from(profile: BusinessProfile) -> Self {
        ProfileRecord {
            area: profile.area,
            seat_count: i64::from(profile.seat_count),
            uses_gas: profile.uses_gas,
            serves_meat: profile.serves_meat,
            offers_delivery: profile.offers_delivery,
        }
    }
}
