pub mod charts;
pub mod export;
pub mod formatter;

pub use charts::{bar_data, radar_data, BarDatum, RadarDatum};
pub use export::export_records;
pub use formatter::{
    format_catalog, format_category_score, format_dashboard_table, format_records_json,
    format_result_summary, format_scores, format_scores_json, format_style_legend, percent_bar,
    should_use_colors,
};
