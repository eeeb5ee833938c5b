//! Diesel schema for the job queue.

diesel::table! {
    /// Build jobs: the live queue plus the history of finished runs.
    jobs (id) {
        /// Database-assigned identifier.
        id -> Int8,
        /// Work the job asks for.
        function -> Text,
        /// JSON-encoded tag fields.
        payload -> Text,
        /// Lease flag.
        assigned -> Bool,
        /// Terminal flag.
        finished -> Bool,
        /// Failure flag.
        failed -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
