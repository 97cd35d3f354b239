//! Help menu export for the website.
//!
//! Reads the in-game help menu definition, converts its textures to PNG, crops the
//! referenced atlas regions and writes `config.json` plus one `<lang>.json` per
//! language file.
mod error;
mod export;
mod images;
mod loader;
mod model;

pub use error::HelpMenuError;
pub use export::{
    CONFIG_JSON,
    HelpMenuReport,
    export_help_menu,
};
pub use images::{
    convert_images,
    convert_to_png,
    crop_region,
    crop_regions,
    decode_image,
    region_file_name,
};
pub use loader::load_help_menu;
pub use model::{
    Image,
    L10N_PREFIX,
    MenuCategory,
    Page,
    Paragraph,
    Text,
};
