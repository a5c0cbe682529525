//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter      | Implements                | Connects to                |
//! |--------------|---------------------------|----------------------------|
//! | `gpio`       | InputLine, EdgeInterrupt  | ESP32 GPIO + ISR service   |
//! | `time`       | Clock (+ DelayNs)         | esp_timer / FreeRTOS delay |
//! | `log_sink`   | EventSink                 | Serial log output          |
//! | `activation` | ModeActivator             | Mode LED + web-server hook |

pub mod activation;
pub mod gpio;
pub mod log_sink;
pub mod time;
