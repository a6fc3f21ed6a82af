//! Helper macro for declaring port error enums with `impl Into` constructors.

macro_rules! define_port_error {
    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = concat!("Build a [`Self::", stringify!($variant), "`] error.")]
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
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field : $ty),* },
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant { $($field : $ty),* });
            )*

            /// Human-readable detail carried by the error, without the prefix.
            pub fn message(&self) -> &str {
                match self {
                    $( Self::$variant { message, .. } => message.as_str(), )*
                }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum ClinicPortError {
            Offline { message: String } => "clinic store offline: {message}",
            Rejected { message: String, row: i64 } => "row {row} rejected: {message}",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = ClinicPortError::offline("disk unplugged");
        assert_eq!(err.to_string(), "clinic store offline: disk unplugged");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = ClinicPortError::rejected("identity number taken", 7_i64);
        assert_eq!(err.to_string(), "row 7 rejected: identity number taken");
    }

    #[test]
    fn message_strips_the_variant_prefix() {
        let err = ClinicPortError::rejected("identity number taken", 7_i64);
        assert_eq!(err.message(), "identity number taken");
    }
}
