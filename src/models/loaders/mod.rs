pub mod text_loader;

pub use text_loader::{load_all_canvas_files, load_canvas_file, CanvasFile};
