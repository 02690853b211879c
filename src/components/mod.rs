pub mod contact_form;
pub mod dropdown_memory;
pub mod lazy_images;
pub mod nav;
pub mod stats_counter;
