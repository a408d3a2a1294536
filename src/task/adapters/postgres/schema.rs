//! Diesel schema for task and comment persistence.

diesel::table! {
    /// Task records keyed by owning project and task identifier.
    tasks (project_id, id) {
        /// Owning project identifier.
        project_id -> Uuid,
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Workflow status.
        #[max_length = 50]
        status -> Varchar,
        /// Priority.
        #[max_length = 50]
        priority -> Varchar,
        /// Assigned user identifier.
        assignee_id -> Uuid,
        /// Creating user identifier.
        creator_id -> Uuid,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
        /// Tag list as a JSON array of strings.
        tags -> Jsonb,
        /// Whether the task is active.
        is_active -> Bool,
        /// Display order position.
        display_order -> BigInt,
        /// Derived comment counter.
        comment_count -> BigInt,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Completion timestamp, if completed.
        completed_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Comment records keyed by owning project, task, and comment identifier.
    comments (project_id, task_id, id) {
        /// Owning project identifier.
        project_id -> Uuid,
        /// Owning task identifier.
        task_id -> Uuid,
        /// Comment identifier.
        id -> Uuid,
        /// Authoring user identifier.
        author_id -> Uuid,
        /// Comment body.
        body -> Text,
        /// Whether the comment is active.
        is_active -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(tasks, comments);
