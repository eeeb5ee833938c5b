//! Diesel schema for build statuses.

diesel::table! {
    /// Latest outcome per canonical tag.
    statuses (id) {
        /// Canonical tag string.
        id -> Text,
        /// Uppercase status label.
        label -> Text,
        /// Rendered Dockerfile.
        file -> Nullable<Text>,
        /// Build output or failure message.
        log -> Nullable<Text>,
        /// Build time in whole seconds.
        build_time -> Int4,
        /// Whether the latest label assignment changed the label.
        changed -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
