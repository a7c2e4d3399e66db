// Domain layer: card/set models, ports and the selection store. No I/O here.

pub mod model;
pub mod ports;
pub mod selection;
