pub mod action_bar;
pub mod empty_state;
pub mod map_list;
pub mod status_line;
pub mod year_filter_dialog;
