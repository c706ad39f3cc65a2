pub mod background;
pub mod branding;
pub mod composite;
pub mod encode;
pub mod genres;
pub mod pipeline;
pub mod rating;
pub mod text_block;
