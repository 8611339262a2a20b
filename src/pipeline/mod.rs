pub mod annotate;
pub mod checklist;
pub mod checks;
pub mod jurisdiction;
pub mod processor;
pub mod report;
pub mod template_index;
