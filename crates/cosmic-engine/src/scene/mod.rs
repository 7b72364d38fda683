pub mod drawing;
pub mod landing;

pub use drawing::DrawingScene;
pub use landing::LandingScene;
