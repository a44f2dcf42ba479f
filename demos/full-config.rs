use ina219_monitor::address::{Address, Pin};
use ina219_monitor::calibration::Calibration;
use ina219_monitor::configuration::{AdcSetting, BusVoltageRange, Configuration, Gain};
use ina219_monitor::SyncIna219;
use linux_embedded_hal::I2cdev;
use std::error::Error;
use std::time::Duration;

fn main() -> Result<(), Box<dyn Error>> {
    let device = I2cdev::new("/dev/i2c-1")?;

    let configuration = Configuration {
        // Be extra precise, but take some extra time
        bus_adc: AdcSetting::Avg128,
        shunt_adc: AdcSetting::Avg128,

        // We only care about low voltage bus and shunt, values larger are truncated to the max
        bus_voltage_range: BusVoltageRange::Fsr16v,
        gain: Gain::Div1,
    };

    // A 0.1 Ohm shunt sees at most 40mV at gain 1, so no more than 400mA are expected
    let calibration = Calibration::new(0.1, 0.4)?;

    // A0 tied to VS, A1 to GND
    let address = Address::from_pins(Pin::Vcc, Pin::Gnd);
    let mut ina = SyncIna219::with_i2c(device, address, calibration, configuration)?;

    // Wait for the for measurement to be done
    let conversion_time = Duration::from_micros(u64::from(configuration.conversion_time_us()));
    std::thread::sleep(conversion_time);

    let measurements = ina.measurements()?;
    if measurements.math_overflow {
        eprintln!("Current or power calculation overflowed");
    }
    println!("Bus:     {:.2}  V", measurements.bus_voltage_v);
    println!("Shunt:   {:.2} mV", measurements.shunt_voltage_v * 1000.0);
    println!("Current: {:.1} mA", measurements.current_a * 1000.0);
    println!("Power:   {:.1} mW", measurements.power_w * 1000.0);

    Ok(())
}
