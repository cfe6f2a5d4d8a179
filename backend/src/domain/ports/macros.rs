//! `define_port_error!`: thiserror enums with snake_case constructors.
//!
//! Each variant gets a constructor named after it; struct fields become
//! `impl Into<T>` parameters in declaration order.

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
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum LedgerProbeError {
            Offline => "ledger offline",
            Timeout { message: String } => "ledger timed out: {message}",
            Rejected { message: String, attempts: u8 } => "rejected after {attempts}: {message}",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(LedgerProbeError::offline(), LedgerProbeError::Offline);
        assert_eq!(LedgerProbeError::offline().to_string(), "ledger offline");
    }

    #[test]
    fn string_fields_accept_borrowed_input() {
        let err = LedgerProbeError::timeout("5s");
        assert_eq!(err.to_string(), "ledger timed out: 5s");
    }

    #[test]
    fn fields_keep_declaration_order() {
        let err = LedgerProbeError::rejected("quota", 3_u8);
        assert_eq!(err.to_string(), "rejected after 3: quota");
    }
}
