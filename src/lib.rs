// utils
pub mod error;
pub mod xml;

// shared identifiers and scalars
pub mod types;
pub mod encoder;
pub mod decoder;

// folders
pub mod foldertypes;
pub mod folderencoder;
pub mod folderdecoder;

// items
pub mod itemtypes;
pub mod itemencoder;
pub mod itemdecoder;

// attachments
pub mod attachmenttypes;
pub mod attachmentencoder;
pub mod attachmentdecoder;

// property paths and sort/group keys
pub mod searchtypes;
pub mod searchencoder;
pub mod searchdecoder;
