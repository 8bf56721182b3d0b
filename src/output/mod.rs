pub mod export;
pub mod formatter;

pub use export::save_result_json;
pub use formatter::{
    format_condition_list, format_result_json, format_result_text, should_use_colors,
};
