use ina219_monitor::address::Address;
use ina219_monitor::calibration::Calibration;
use ina219_monitor::configuration::Configuration;
use ina219_monitor::SyncIna219;
use linux_embedded_hal::I2cdev;
use std::error::Error;
use std::time::Duration;

fn main() -> Result<(), Box<dyn Error>> {
    let device = I2cdev::new("/dev/i2c-1")?;

    // 0.1 Ohm shunt, up to 3.2A
    let calibration = Calibration::new(0.1, 3.2)?;
    let configuration = Configuration::default();
    let address = Address::from_byte(0x40)?;
    let mut ina = SyncIna219::with_i2c(device, address, calibration, configuration)?;

    // Wait until a result is ready
    std::thread::sleep(Duration::from_micros(u64::from(configuration.conversion_time_us())));

    println!("INA219 at {:#04x}", u8::from(ina.port_mut().address()));
    println!("Bus Voltage:   {:.3} V", ina.bus_voltage()?);
    println!("Shunt Voltage: {:.5} V", ina.shunt_voltage()?);
    println!("Current:       {:.4} A", ina.current()?);
    println!("Power:         {:.4} W", ina.power()?);

    Ok(())
}
