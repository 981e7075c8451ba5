//! Diesel schema for task persistence.
//!
//! The actual duration and the cost total are never stored; both are
//! re-derived on load from the columns that define them.

diesel::table! {
    /// Work orders with their embedded media, materials, and sub-records.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Target site.
        site_id -> Uuid,
        /// Target sections within the site.
        section_ids -> Array<Uuid>,
        /// Client the work is performed for.
        client_id -> Uuid,
        /// Assigned worker account, if any.
        worker_id -> Nullable<Uuid>,
        /// Branch materials draw from, if any.
        branch_id -> Nullable<Uuid>,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// When the work is scheduled.
        scheduled_date -> Timestamptz,
        /// Planned duration in hours, if estimated.
        estimated_duration_hours -> Nullable<Double>,
        /// When work started.
        started_at -> Nullable<Timestamptz>,
        /// When work completed.
        completed_at -> Nullable<Timestamptz>,
        /// Check-in GPS fix.
        start_fix -> Nullable<Jsonb>,
        /// Check-out GPS fix.
        end_fix -> Nullable<Jsonb>,
        /// Before/after attachment gallery.
        gallery -> Jsonb,
        /// Reference media copied from the target sections at creation.
        reference_media -> Jsonb,
        /// Planned material consumption lines.
        materials -> Jsonb,
        /// Labor cost component.
        cost_labor -> Double,
        /// Materials cost component.
        cost_materials -> Double,
        /// Admin review sub-record, if any.
        review -> Nullable<Jsonb>,
        /// Client feedback sub-record, if any.
        feedback -> Nullable<Jsonb>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
