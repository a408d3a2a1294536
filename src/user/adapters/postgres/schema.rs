//! Diesel schema for user persistence.

diesel::table! {
    /// User account records keyed by identifier.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Email address.
        #[max_length = 255]
        email -> Varchar,
        /// Display name.
        #[max_length = 255]
        display_name -> Varchar,
        /// Avatar URL or emoji.
        avatar -> Text,
        /// Whether the account is active.
        is_active -> Bool,
        /// IANA timezone name.
        #[max_length = 64]
        timezone -> Varchar,
        /// Interface theme preference.
        #[max_length = 50]
        theme -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last-active timestamp, if any.
        last_active_at -> Nullable<Timestamptz>,
    }
}
