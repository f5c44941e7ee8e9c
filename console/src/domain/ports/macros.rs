//! Helper macro generating port error enums.
//!
//! Each variant gets a snake_case constructor taking `impl Into<_>` per field,
//! and the enum gets a `kind()` accessor naming the variant for log fields.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*

            /// Variant name, stable across message changes.
            #[must_use]
            pub const fn kind(&self) -> &'static str {
                match self {
                    $( Self::$variant { .. } => stringify!($variant), )*
                }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum GatewayError {
            Offline => "gateway offline",
            Refused { reason: String } => "refused: {reason}",
            Rejected { status: u16, body: String } => "rejected with {status}: {body}",
        }
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(GatewayError::offline().to_string(), "gateway offline");
    }

    #[test]
    fn string_fields_accept_str() {
        assert_eq!(GatewayError::refused("busy").to_string(), "refused: busy");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = GatewayError::rejected(503_u16, "maintenance");
        assert_eq!(err.to_string(), "rejected with 503: maintenance");
        assert!(matches!(err, GatewayError::Rejected { status: 503, .. }));
    }

    #[test]
    fn kind_names_the_variant() {
        assert_eq!(GatewayError::offline().kind(), "Offline");
        assert_eq!(GatewayError::refused("busy").kind(), "Refused");
    }
}
