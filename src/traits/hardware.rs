use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::error::Result;

/// Raw access to the machine's temperature sensors.
///
/// Each channel is read independently and any of them may fail. Implementors do not
/// substitute defaults themselves; [`SensorReader`](crate::temperature::SensorReader)
/// applies timeouts and fallback values on top of this trait.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use thermal_bench::traits::ThermalSensor;
/// use thermal_bench::Result;
///
/// struct RoomTemperature;
///
/// #[async_trait]
/// impl ThermalSensor for RoomTemperature {
///     async fn cpu_temperature(&self) -> Result<f64> {
///         Ok(40.0)
///     }
///
///     async fn disk_temperature(&self) -> Result<f64> {
///         Ok(32.0)
///     }
///
///     async fn ambient_temperature(&self) -> Result<f64> {
///         Ok(22.0)
///     }
/// }
/// ```
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ThermalSensor: Send + Sync {
    /// Current CPU temperature in Celsius
    async fn cpu_temperature(&self) -> Result<f64>;

    /// Current disk temperature in Celsius
    async fn disk_temperature(&self) -> Result<f64>;

    /// Current ambient (in-case) temperature in Celsius
    async fn ambient_temperature(&self) -> Result<f64>;
}
