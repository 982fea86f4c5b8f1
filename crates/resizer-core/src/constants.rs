/// Width in pixels every image is resized to; height follows the aspect ratio.
pub const TARGET_WIDTH: u32 = 1024;

/// JPEG encoder quality used for the resized output.
pub const JPEG_QUALITY: u8 = 80;

/// Extension every destination key is normalized to.
pub const OUTPUT_EXTENSION: &str = "jpg";

pub const PROFILE_CATEGORY: &str = "profile";
pub const PROFILE_BUCKET: &str = "outfix-profile-images";

pub const COLLAGE_CATEGORY: &str = "collage";
pub const COLLAGE_BUCKET: &str = "outfix-outfit-collage-images";
