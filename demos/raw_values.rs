use ina219_monitor::address::Address;
use ina219_monitor::calibration::Calibration;
use ina219_monitor::configuration::Configuration;
use ina219_monitor::SyncIna219;
use linux_embedded_hal::I2cdev;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let device = I2cdev::new("/dev/i2c-1")?;

    let calibration = Calibration::new(0.1, 3.2)?;
    let mut ina = SyncIna219::with_i2c(
        device,
        Address::default(),
        calibration,
        Configuration::default(),
    )?;

    println!("configuration: {:?}", ina.configuration()?);
    println!("calibration register: {}", calibration.register_bits());
    println!("current LSB: {} A", calibration.current_lsb_a());

    let bus = ina.bus_voltage_register()?;
    println!(
        "bus voltage: {} x 4mV (conversion ready: {}, overflow: {})",
        bus.voltage_4mv(),
        bus.is_conversion_ready(),
        bus.has_math_overflowed()
    );

    let shunt = ina.shunt_voltage_register()?;
    println!("shunt voltage: {} x 10uV", shunt.shunt_voltage_10uv());

    Ok(())
}
