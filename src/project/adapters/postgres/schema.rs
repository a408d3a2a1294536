//! Diesel schema for project persistence.

diesel::table! {
    /// Project records with derived task counters.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Project name.
        #[max_length = 255]
        name -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Accent colour as `#rrggbb`.
        #[max_length = 16]
        color -> Varchar,
        /// Display emoji.
        #[max_length = 32]
        emoji -> Varchar,
        /// Owning user identifier.
        owner_id -> Uuid,
        /// Whether the project is active.
        is_active -> Bool,
        /// Whether the project is publicly visible.
        is_public -> Bool,
        /// Derived total task counter.
        task_count -> BigInt,
        /// Derived completed task counter.
        completed_task_count -> BigInt,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
