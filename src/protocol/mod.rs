//! Line protocol between the referee, the players and the viewer

pub mod command;
pub mod view;

pub use command::{Command, CommandError, ShipOrder, parse_command};
pub use view::{FleetView, FrameSnapshot, ShipView};
