// Hardware Abstraction Layer (HAL) Module
//
// Implementiert die Traits aus ticker-core für die ESP32-C6 Hardware.
// Die Logik selbst bleibt in ticker-core und wird dort getestet.

pub mod clock;
pub mod http_client;
pub mod lcd;
pub mod led_writer;
pub mod network;

pub use clock::EmbassyClock;
pub use http_client::TcpHttpClient;
pub use lcd::I2cLcd;
pub use led_writer::RmtLedWriter;
pub use network::StackConnectivity;
