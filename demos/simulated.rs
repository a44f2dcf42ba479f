use ina219_monitor::calibration::Calibration;
use ina219_monitor::configuration::Configuration;
use ina219_monitor::simulator::Simulator;
use ina219_monitor::SyncIna219;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let calibration = Calibration::new(0.1, 3.0)?;
    let sim = Simulator::new(20e-3, 12.0);
    let mut ina = SyncIna219::new(sim, calibration, Configuration::default())?;

    for shunt_mv in [-320.0, -20.0, 0.0, 20.0, 250.0, 330.0] {
        ina.port_mut().set_shunt_voltage(shunt_mv / 1000.0);
        let m = ina.measurements()?;
        println!(
            "shunt {:8.2} mV -> current {:7.4} A, power {:7.3} W{}",
            m.shunt_voltage_v * 1000.0,
            m.current_a,
            m.power_w,
            if m.math_overflow { " (overflow)" } else { "" }
        );
    }

    Ok(())
}
