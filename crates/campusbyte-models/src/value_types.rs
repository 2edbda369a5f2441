//! Domain primitives: wall-clock times and the text-backed enumerations.
//!
//! Every enum here is stored as `TEXT` in Postgres and serialized with the
//! exact spelling the API exposes (`"Mon"`, `"UPCOMING"`, `"in-progress"`, ...).
//!
//! ```ignore
//! use campusbyte_models::value_types::{ClockTime, Day, RegistrationStatus};
//!
//! let start: ClockTime = "09:30".parse().unwrap();
//! assert_eq!(start.minutes(), 570);
//!
//! let day: Day = "Tue".parse().unwrap();
//! assert!(RegistrationStatus::Upcoming.allows_offering_changes());
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::{
    Database, Decode, Encode, Type,
    postgres::{PgHasArrayType, PgTypeInfo},
};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use utoipa::ToSchema;

/// Error type for value type parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueTypeError {
    /// The time is not a 24-hour `HH:MM` string.
    InvalidClockTime(String),
    /// The text does not name any variant of the enum.
    UnknownVariant { kind: &'static str, value: String },
}

impl std::error::Error for ValueTypeError {}

impl fmt::Display for ValueTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidClockTime(value) => write!(
                f,
                "Invalid time format '{}', expected \"HH:MM\" in 24 hours format",
                value
            ),
            Self::UnknownVariant { kind, value } => {
                write!(f, "'{}' is not a valid {}", value, kind)
            }
        }
    }
}

// ============================================================================
// ClockTime
// ============================================================================

static CLOCK_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01]?[0-9]|2[0-3]):[0-5][0-9]$").expect("clock time pattern is valid")
});

/// A time of day with minute precision, written `HH:MM` (24-hour clock).
///
/// Internally the value is minutes since midnight, so ordering and overlap
/// checks are plain integer comparisons. A one-digit hour (`"9:05"`) is
/// accepted on input; output is always zero-padded.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ToSchema)]
#[schema(value_type = String, example = "09:30")]
pub struct ClockTime(u16);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Builds a time from hour and minute, `None` when out of range.
    pub const fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self(hour as u16 * 60 + minute as u16))
        } else {
            None
        }
    }

    #[inline]
    pub const fn minutes(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    #[inline]
    pub const fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }

    pub fn parse(value: &str) -> Result<Self, ValueTypeError> {
        let trimmed = value.trim();
        let invalid = || ValueTypeError::InvalidClockTime(value.to_string());

        if !CLOCK_TIME_RE.is_match(trimmed) {
            return Err(invalid());
        }

        let (hour, minute) = trimmed.split_once(':').ok_or_else(invalid)?;
        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;

        Self::from_hm(hour, minute).ok_or_else(invalid)
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({})", self)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = ValueTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for ClockTime {
    type Error = ValueTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl Serialize for ClockTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl Type<sqlx::Postgres> for ClockTime {
    fn type_info() -> PgTypeInfo {
        <String as Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <String as Type<sqlx::Postgres>>::compatible(ty)
    }
}

impl<'q> Encode<'q, sqlx::Postgres> for ClockTime {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as Encode<'q, sqlx::Postgres>>::encode(self.to_string(), buf)
    }
}

impl<'r> Decode<'r, sqlx::Postgres> for ClockTime {
    fn decode(
        value: <sqlx::Postgres as Database>::ValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as Decode<'r, sqlx::Postgres>>::decode(value)?;
        Ok(Self::parse(s)?)
    }
}

// ============================================================================
// Text-backed enumerations
// ============================================================================

/// Declares a fieldless enum whose variants map one-to-one onto fixed strings.
///
/// The strings are used for serde, `Display`/`FromStr` and the Postgres `TEXT`
/// column encoding alike. Variant declaration order defines `Ord`.
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $text:tt
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
            ToSchema,
        )]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValueTypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(ValueTypeError::UnknownVariant {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl Type<sqlx::Postgres> for $name {
            fn type_info() -> PgTypeInfo {
                <String as Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <String as Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'q> Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <sqlx::Postgres as Database>::ArgumentBuffer<'q>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <&str as Encode<'q, sqlx::Postgres>>::encode(self.as_str(), buf)
            }
        }

        impl<'r> Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: <sqlx::Postgres as Database>::ValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let s = <&str as Decode<'r, sqlx::Postgres>>::decode(value)?;
                Ok(s.parse::<$name>()?)
            }
        }

        impl PgHasArrayType for $name {
            fn array_type_info() -> PgTypeInfo {
                <String as PgHasArrayType>::array_type_info()
            }
        }
    };
}

text_enum!(
    /// Day of the week, in the order the academic week runs (Saturday first).
    Day {
        Sat => "Sat",
        Sun => "Sun",
        Mon => "Mon",
        Tue => "Tue",
        Wed => "Wed",
        Thu => "Thu",
        Fri => "Fri",
    }
);

text_enum!(
    /// Lifecycle status of a semester registration period.
    RegistrationStatus {
        Upcoming => "UPCOMING",
        Ongoing => "ONGOING",
        Ended => "ENDED",
    }
);

impl RegistrationStatus {
    /// New offerings may be created until the registration has ended.
    pub fn allows_new_offerings(self) -> bool {
        self != Self::Ended
    }

    /// Existing offerings may only be edited or removed before registration opens.
    pub fn allows_offering_changes(self) -> bool {
        self == Self::Upcoming
    }

    /// Status only moves forward one step at a time: UPCOMING, ONGOING, ENDED.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Upcoming, Self::Upcoming)
                | (Self::Upcoming, Self::Ongoing)
                | (Self::Ongoing, Self::Ongoing)
                | (Self::Ongoing, Self::Ended)
        )
    }
}

text_enum!(UserRole {
    Student => "student",
    Faculty => "faculty",
    Admin => "admin",
});

text_enum!(UserStatus {
    InProgress => "in-progress",
    Blocked => "blocked",
});

text_enum!(Gender {
    Male => "male",
    Female => "female",
    Other => "other",
});

text_enum!(BloodGroup {
    APositive => "A+",
    ANegative => "A-",
    BPositive => "B+",
    BNegative => "B-",
    AbPositive => "AB+",
    AbNegative => "AB-",
    OPositive => "O+",
    ONegative => "O-",
});

text_enum!(SemesterName {
    Autumn => "Autumn",
    Summer => "Summer",
    Fall => "Fall",
});

text_enum!(
    /// Two-digit semester code embedded in student login ids.
    SemesterCode {
        First => "01",
        Second => "02",
        Third => "03",
    }
);

impl SemesterName {
    /// The only code a semester with this name may carry.
    pub fn code(self) -> SemesterCode {
        match self {
            Self::Autumn => SemesterCode::First,
            Self::Summer => SemesterCode::Second,
            Self::Fall => SemesterCode::Third,
        }
    }
}

text_enum!(Month {
    January => "January",
    February => "February",
    March => "March",
    April => "April",
    May => "May",
    June => "June",
    July => "July",
    August => "August",
    September => "September",
    October => "October",
    November => "November",
    December => "December",
});
