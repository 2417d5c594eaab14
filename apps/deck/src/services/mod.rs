//! Services: the animation-side screen driver, the committed state owner and
//! the ports they talk to.

pub mod committed;
pub mod ports;
pub mod screen;
