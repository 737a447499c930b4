pub mod saved;

pub use saved::{
    CalculationStore, CurrentCalculation, SavedCalculation, SavedSummary, CLEANUP_KEEP,
    MAX_SAVED_CALCULATIONS, STORE_VERSION,
};
