//! One-shot GPIO initialisation and raw pin access.
//!
//! Configures the two trigger inputs, the mode LED and the GPIO ISR service
//! using raw ESP-IDF sys calls.  Called once from `main()` before the
//! trigger loop starts.
//!
//! On host builds every function has a simulation twin backed by a level
//! table, so adapters and tests run without hardware.  Driving a
//! simulated level across a registered edge sets that pin's latch the same
//! way the real ISR would.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::app::ports::{Edge, Pull};
use crate::latch::InterruptLatch;
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    InvalidGpio(i32),
    GpioConfigFailed { gpio: i32, code: i32 },
    IsrInstallFailed(i32),
    IsrHandlerAddFailed { gpio: i32, code: i32 },
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidGpio(gpio) => write!(f, "GPIO {} does not exist", gpio),
            Self::GpioConfigFailed { gpio, code } => {
                write!(f, "GPIO {} config failed (rc={})", gpio, code)
            }
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
            Self::IsrHandlerAddFailed { gpio, code } => {
                write!(f, "GPIO {} ISR handler add failed (rc={})", gpio, code)
            }
        }
    }
}

impl std::error::Error for HwInitError {}

impl From<HwInitError> for crate::error::Error {
    fn from(e: HwInitError) -> Self {
        match e {
            HwInitError::InvalidGpio(gpio) => Self::Gpio { gpio, code: -1 },
            HwInitError::GpioConfigFailed { gpio, code }
            | HwInitError::IsrHandlerAddFailed { gpio, code } => Self::Gpio { gpio, code },
            HwInitError::IsrInstallFailed(_) => Self::Init("GPIO ISR service"),
        }
    }
}

fn check_gpio(gpio: i32) -> Result<(), HwInitError> {
    if pins::is_valid_gpio(gpio) {
        Ok(())
    } else {
        Err(HwInitError::InvalidGpio(gpio))
    }
}

// ── GPIO Inputs ───────────────────────────────────────────────

/// Configure `gpio` as an input with the given pull.
///
/// Pads without internal pulls (34-39) rely on the board's external
/// resistor; the requested pull is then only recorded, not applied.
#[cfg(target_os = "espidf")]
pub fn configure_input(gpio: i32, pull: Pull) -> Result<(), HwInitError> {
    check_gpio(gpio)?;
    let internal = pins::has_internal_pulls(gpio);
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << gpio,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: if internal && pull == Pull::Up {
            gpio_pullup_t_GPIO_PULLUP_ENABLE
        } else {
            gpio_pullup_t_GPIO_PULLUP_DISABLE
        },
        pull_down_en: if internal && pull == Pull::Down {
            gpio_pulldown_t_GPIO_PULLDOWN_ENABLE
        } else {
            gpio_pulldown_t_GPIO_PULLDOWN_DISABLE
        },
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    // SAFETY: gpio_config reads the struct and programs the IO MUX for a
    // validated pad; called from the single-threaded init path.
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed { gpio, code: ret });
    }
    info!(
        "hw_init: GPIO {} input, pull {:?}{}",
        gpio,
        pull,
        if internal { "" } else { " (external)" }
    );
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn configure_input(gpio: i32, pull: Pull) -> Result<(), HwInitError> {
    check_gpio(gpio)?;
    sim::set_idle(gpio, pull);
    log::info!("hw_init(sim): GPIO {} input, pull {:?}", gpio, pull);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(pin: i32) -> bool {
    sim::level(pin)
}

// ── GPIO Outputs ──────────────────────────────────────────────

/// Configure `gpio` as a push-pull output driven to `initial_high`.
#[cfg(target_os = "espidf")]
pub fn configure_output(gpio: i32, initial_high: bool) -> Result<(), HwInitError> {
    check_gpio(gpio)?;
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << gpio,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    // SAFETY: as in configure_input.
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed { gpio, code: ret });
    }
    gpio_write(gpio, initial_high);
    info!("hw_init: GPIO {} output", gpio);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn configure_output(gpio: i32, initial_high: bool) -> Result<(), HwInitError> {
    check_gpio(gpio)?;
    gpio_write(gpio, initial_high);
    log::info!("hw_init(sim): GPIO {} output", gpio);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin.
    // Main-loop only.
    unsafe {
        gpio_set_level(pin, u32::from(high));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) {
    sim::store(pin, high);
}

// ── GPIO ISR Service ──────────────────────────────────────────

/// Per-pin handler: the registration argument is the pin's latch.
#[cfg(target_os = "espidf")]
unsafe extern "C" fn latch_gpio_isr(arg: *mut core::ffi::c_void) {
    // SAFETY: `arg` was produced from a `&'static InterruptLatch` in
    // add_edge_handler, so it is valid for the life of the program.  The
    // latch store is a single atomic write; safe in ISR context.
    let latch = unsafe { &*(arg as *const InterruptLatch) };
    latch.set();
}

/// Install the per-pin GPIO ISR service.
/// Call once before registering any edge handler.
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<(), HwInitError> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed (acceptable).
    let ret = unsafe { gpio_install_isr_service(0) };
    if ret != ESP_OK as i32 && ret != ESP_ERR_INVALID_STATE as i32 {
        return Err(HwInitError::IsrInstallFailed(ret));
    }
    info!("hw_init: GPIO ISR service installed");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}

/// Route `edge` interrupts on `gpio` to `latch.set()`.
#[cfg(target_os = "espidf")]
pub fn add_edge_handler(
    gpio: i32,
    edge: Edge,
    latch: &'static InterruptLatch,
) -> Result<(), HwInitError> {
    check_gpio(gpio)?;
    let intr = match edge {
        Edge::Falling => gpio_int_type_t_GPIO_INTR_NEGEDGE,
        Edge::Rising => gpio_int_type_t_GPIO_INTR_POSEDGE,
    };
    let arg = latch as *const InterruptLatch as *mut core::ffi::c_void;
    // SAFETY: the ISR service is installed (init_isr_service) and the
    // handler argument outlives the registration ('static).
    unsafe {
        let ret = gpio_set_intr_type(gpio, intr);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed { gpio, code: ret });
        }
        let ret = gpio_isr_handler_add(gpio, Some(latch_gpio_isr), arg);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::IsrHandlerAddFailed { gpio, code: ret });
        }
        let ret = gpio_intr_enable(gpio);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed { gpio, code: ret });
        }
    }
    info!("hw_init: GPIO {} {:?} edge -> latch", gpio, edge);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn add_edge_handler(
    gpio: i32,
    edge: Edge,
    latch: &'static InterruptLatch,
) -> Result<(), HwInitError> {
    check_gpio(gpio)?;
    sim::attach(gpio, edge, latch);
    log::info!("hw_init(sim): GPIO {} {:?} edge -> latch", gpio, edge);
    Ok(())
}

// ── Simulation ────────────────────────────────────────────────

/// Simulated GPIO block for host builds.
#[cfg(not(target_os = "espidf"))]
pub mod sim {
    use core::sync::atomic::{AtomicBool, AtomicPtr, AtomicU8, Ordering};

    use crate::app::ports::{Edge, Pull};
    use crate::latch::InterruptLatch;
    use crate::pins::{MAX_GPIO, is_valid_gpio};

    const PADS: usize = MAX_GPIO as usize + 1;

    const EDGE_NONE: u8 = 0;
    const EDGE_FALLING: u8 = 1;
    const EDGE_RISING: u8 = 2;

    static LEVELS: [AtomicBool; PADS] = [const { AtomicBool::new(false) }; PADS];
    static EDGES: [AtomicU8; PADS] = [const { AtomicU8::new(EDGE_NONE) }; PADS];
    static LATCHES: [AtomicPtr<InterruptLatch>; PADS] =
        [const { AtomicPtr::new(core::ptr::null_mut()) }; PADS];

    pub(super) fn set_idle(gpio: i32, pull: Pull) {
        store(gpio, pull == Pull::Up);
    }

    pub(super) fn level(gpio: i32) -> bool {
        is_valid_gpio(gpio) && LEVELS[gpio as usize].load(Ordering::Acquire)
    }

    pub(super) fn store(gpio: i32, high: bool) {
        if is_valid_gpio(gpio) {
            LEVELS[gpio as usize].store(high, Ordering::Release);
        }
    }

    pub(super) fn attach(gpio: i32, edge: Edge, latch: &'static InterruptLatch) {
        let code = match edge {
            Edge::Falling => EDGE_FALLING,
            Edge::Rising => EDGE_RISING,
        };
        let idx = gpio as usize;
        LATCHES[idx].store(core::ptr::from_ref(latch).cast_mut(), Ordering::Release);
        EDGES[idx].store(code, Ordering::Release);
    }

    /// Drive a simulated input, firing its edge handler on a matching
    /// transition.
    pub fn drive(gpio: i32, high: bool) {
        if !is_valid_gpio(gpio) {
            return;
        }
        let idx = gpio as usize;
        let was_high = LEVELS[idx].swap(high, Ordering::AcqRel);
        let fired = match EDGES[idx].load(Ordering::Acquire) {
            EDGE_FALLING => was_high && !high,
            EDGE_RISING => !was_high && high,
            _ => false,
        };
        if fired {
            let latch = LATCHES[idx].load(Ordering::Acquire);
            // SAFETY: only `&'static InterruptLatch` values are stored.
            if let Some(latch) = unsafe { latch.as_ref() } {
                latch.set();
            }
        }
    }

    /// Current simulated level of an output or input.
    pub fn read(gpio: i32) -> bool {
        level(gpio)
    }
}
