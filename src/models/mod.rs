pub mod brand;
pub mod bundle;
pub mod organization;
pub mod traits;

pub use brand::{Brand, BrandDirectory, Location, Portal, PortalInherit};
pub use bundle::{BrandBundle, BundleEntry};
pub use organization::Organization;
pub use traits::{Clock, FixedClock, SystemClock};
