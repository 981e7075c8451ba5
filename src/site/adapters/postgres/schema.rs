//! Diesel schema for site persistence.

diesel::table! {
    /// Sites with their embedded sections.
    sites (id) {
        /// Internal site identifier.
        id -> Uuid,
        /// Owning client account.
        client_id -> Uuid,
        /// Site name.
        #[max_length = 255]
        name -> Varchar,
        /// Physical location.
        #[max_length = 255]
        location -> Varchar,
        /// Kind of site, free-form.
        #[max_length = 100]
        site_type -> Varchar,
        /// Cover image descriptor, if set.
        cover_image -> Nullable<Jsonb>,
        /// Total-task counter maintained by the lifecycle engine.
        total_tasks -> Int4,
        /// Completed-task counter maintained by the lifecycle engine.
        completed_tasks -> Int4,
        /// When a completing worker last visited.
        last_visit -> Nullable<Timestamptz>,
        /// Embedded sections in display order.
        sections -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
