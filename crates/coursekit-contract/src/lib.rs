// crates/coursekit-contract/src/lib.rs
// ============================================================================
// Module: Coursekit Contract
// Description: Wire-format request/response shapes and transport error
// mapping.
// Purpose: Pin the JSON surface hosts speak to the grading core so the core
// crates stay transport-agnostic.
// Dependencies: coursekit-config, coursekit-core, serde, serde_json
// ============================================================================

//! ## Overview
//! Request and response shapes for each exercise family, a result payload
//! mirroring the scoring engine's output, and the status-code mapping for
//! every core error. Field names are snake_case and stable; changing one is
//! a wire-format break, which is why the shapes live here rather than on the
//! core types directly.

pub mod types;

pub use types::DescribeDiagramRequest;
pub use types::DescribeDiagramResponse;
pub use types::ErrorBody;
pub use types::SaveDiagramRequest;
pub use types::SaveDiagramResponse;
pub use types::SubmitAnswerRequest;
pub use types::SubmitFormulaRequest;
pub use types::SubmitOrderingRequest;
pub use types::SubmitResponse;
