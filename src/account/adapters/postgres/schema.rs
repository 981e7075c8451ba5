//! Diesel schema for account persistence.

diesel::table! {
    /// Account records for admins, workers, and clients.
    accounts (id) {
        /// Internal account identifier.
        id -> Uuid,
        /// Display name of the person.
        #[max_length = 255]
        full_name -> Varchar,
        /// Granted role: admin, worker, or client.
        #[max_length = 20]
        role -> Varchar,
        /// Completed-task counter maintained by the lifecycle engine.
        completed_tasks -> Int4,
        /// Whether the account may take part in new work.
        is_active -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
