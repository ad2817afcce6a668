use derive_more::{Display, Error};

/// A fieldless enum that knows all of its values and their names. Usually implemented through
/// [`enum_values!`](crate::enum_values).
pub trait EnumValues: Copy + Eq + 'static {
    /// Every value, in declaration order.
    const VALUES: &'static [Self];
    /// The name of every value, in the same order as [`VALUES`](EnumValues::VALUES).
    const NAMES: &'static [&'static str];

    fn discriminant(self) -> i64;

    fn name(self) -> &'static str {
        Self::VALUES
            .iter()
            .position(|value| *value == self)
            .and_then(|index| Self::NAMES.get(index))
            .copied()
            .unwrap_or_default()
    }

    /// Parses the exact name of a value, or its discriminant as a number. Surrounding whitespace is
    /// ignored.
    fn parse_value(s: &str) -> Result<Self, ParseEnumError> {
        let trimmed = s.trim();
        let by_name = Self::NAMES
            .iter()
            .position(|name| *name == trimmed)
            .and_then(|index| Self::VALUES.get(index));
        let by_discriminant = || {
            let discriminant = trimmed.parse::<i64>().ok()?;
            Self::VALUES.iter().find(|value| value.discriminant() == discriminant)
        };

        by_name
            .or_else(by_discriminant)
            .copied()
            .ok_or_else(|| ParseEnumError {
                type_name: std::any::type_name::<Self>(),
                input: s.to_owned(),
            })
    }
}

/// Access to every value of an enum from any one of its values.
pub trait EnumExtension: EnumValues {
    fn all_enum_values(&self) -> &'static [Self] {
        Self::VALUES
    }
}

impl<E: EnumValues> EnumExtension for E {}

/// Returns every value of `E`, in declaration order.
pub fn all_enum_values_for<E: EnumValues>() -> &'static [E] {
    E::VALUES
}

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
#[display("{input:?} is not a valid {type_name}")]
pub struct ParseEnumError {
    pub type_name: &'static str,
    pub input: String,
}

/// Declares a fieldless enum implementing [`EnumValues`](crate::ext::EnumValues), along with
/// [`Display`](std::fmt::Display) (the value's name) and [`FromStr`](std::str::FromStr) (a name
/// or discriminant).
///
/// The enum also derives `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq` and `Hash`.
///
/// ```
/// use ease_util::enum_values;
/// use ease_util::ext::{EnumExtension, EnumValues};
///
/// enum_values! {
///     pub enum Step {
///         Undefined = 0,
///         First,
///         Jump = 123,
///         AfterJump,
///     }
/// }
///
/// assert_eq!(Step::VALUES.len(), 4);
/// assert_eq!("Jump".parse::<Step>(), Ok(Step::Jump));
/// assert_eq!("124".parse::<Step>(), Ok(Step::AfterJump));
/// assert_eq!(Step::First.to_string(), "First");
/// assert_eq!(Step::First.all_enum_values(), Step::VALUES);
/// ```
#[macro_export]
macro_rules! enum_values {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident $(= $discriminant:expr)?),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$variant_meta])* $variant $(= $discriminant)?),*
        }

        impl $crate::ext::EnumValues for $name {
            const VALUES: &'static [Self] = &[$($name::$variant),*];
            const NAMES: &'static [&'static str] = &[$(stringify!($variant)),*];

            fn discriminant(self) -> i64 {
                self as i64
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::ext::EnumValues::name(*self))
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::ext::ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as $crate::ext::EnumValues>::parse_value(s)
            }
        }
    };
}
