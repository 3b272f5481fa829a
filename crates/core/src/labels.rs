//! String-labelled enumerations.
//!
//! Plan and transaction enums travel as lowercase strings in JSON bodies and
//! TEXT columns. [`labelled_enum!`] derives the conversions both directions.

/// Raised when a label does not name any variant of the target enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}', expected one of: {expected}")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every accepted label, in declaration order.
            pub const LABELS: &'static [&'static str] = &[$($label),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::labels::UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $label => Ok(Self::$variant), )+
                    other => Err($crate::labels::UnknownLabel {
                        kind: $kind,
                        value: other.to_string(),
                        expected: Self::LABELS.join(", "),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::labels::UnknownLabel;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

pub(crate) use labelled_enum;
