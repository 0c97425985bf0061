pub mod loaders;
pub mod question;
pub mod sync_plan;

pub use loaders::{load_all_canvas_files, load_canvas_file, CanvasFile};
pub use question::{ParsedQuestion, QuestionType, StoredQuestion};
pub use sync_plan::{CreateOp, DeleteOp, QuestionPayload, SyncPlan, UpdateOp};
