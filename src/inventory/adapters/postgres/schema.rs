//! Diesel schema for inventory persistence.

diesel::table! {
    /// Per-branch stocked materials.
    inventory_items (id) {
        /// Internal item identifier.
        id -> Uuid,
        /// Branch the stock belongs to.
        branch_id -> Uuid,
        /// Item name.
        #[max_length = 255]
        name -> Varchar,
        /// Measurement unit: kg, liter, or piece.
        #[max_length = 20]
        unit -> Varchar,
        /// Quantity currently on hand; never negative.
        current_quantity -> Double,
        /// Reorder threshold.
        minimum_quantity -> Double,
        /// Whether the item may still be deducted from.
        is_active -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
