pub mod action_panel;
pub mod decoded_output;
pub mod footer;
pub mod header;
pub mod image_select;
pub mod key_select;
pub mod loading_panel;
pub mod mode_select;
pub mod text_entry;
