// src/ui/widgets/mod.rs

pub mod dashboard; // Search box, tool list and the selected tool's card.
pub mod disclaimer_popup;
pub mod footer; // Notice line and key hints.
pub mod form; // Tool page header and input form.
pub mod report_view;
pub mod summary;
