// Domain layer: plate model and the ports (interfaces) the importer and exporter depend on.

pub mod model;
pub mod ports;
