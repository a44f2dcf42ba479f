use crate::address::Address;
use crate::calibration::Calibration;
use crate::configuration::Configuration;
use crate::errors::InitializationError;
use crate::measurements::{BusVoltage, Measurements, ShuntVoltage};
use crate::register::{signed_from_bits, RegisterAddress};
use embedded_hal_async::i2c::I2c;

/// Access to the 16 bit registers of an INA219
///
/// Every call performs a fresh transaction, nothing is cached.
#[allow(async_fn_in_trait)]
pub trait RegisterPort {
    /// Error reported when a register transaction fails
    type Error;

    /// Write `value` to the register, most significant byte first
    ///
    /// # Errors
    /// Returns an error if the underlying transaction failed.
    async fn write_register(
        &mut self,
        register: RegisterAddress,
        value: u16,
    ) -> Result<(), Self::Error>;

    /// Read the register as an unsigned value
    ///
    /// # Errors
    /// Returns an error if the underlying transaction failed.
    async fn read_register(&mut self, register: RegisterAddress) -> Result<u16, Self::Error>;

    /// Read the register as a two's complement value
    ///
    /// # Errors
    /// Returns an error if the underlying transaction failed.
    async fn read_signed_register(
        &mut self,
        register: RegisterAddress,
    ) -> Result<i16, Self::Error> {
        Ok(signed_from_bits(self.read_register(register).await?))
    }
}

/// [`RegisterPort`] talking to an INA219 over an embedded HAL I2C bus
pub struct I2cRegisters<I2C> {
    i2c: I2C,
    address: Address,
}

impl<I2C> I2cRegisters<I2C>
where
    I2C: I2c,
{
    /// Use the device at `address` on the given bus
    pub const fn new(i2c: I2C, address: Address) -> Self {
        Self { i2c, address }
    }

    /// Address of the device on the bus
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Destroy the port returning the underlying I2C device
    pub fn destroy(self) -> I2C {
        self.i2c
    }
}

impl<I2C> RegisterPort for I2cRegisters<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    async fn write_register(
        &mut self,
        register: RegisterAddress,
        value: u16,
    ) -> Result<(), Self::Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "INA219 {=u8:#x}: write {} = {=u16:#x}",
            self.address.as_byte(),
            register,
            value
        );

        let [hi, lo] = value.to_be_bytes();
        self.i2c
            .write(self.address.as_byte(), &[register.as_byte(), hi, lo])
            .await
    }

    async fn read_register(&mut self, register: RegisterAddress) -> Result<u16, Self::Error> {
        let mut buf: [u8; 2] = [0x00; 2];
        let addr = self.address.as_byte();
        if cfg!(feature = "no_transaction") {
            self.i2c.write(addr, &[register.as_byte()]).await?;
            self.i2c.read(addr, &mut buf).await?;
        } else {
            self.i2c
                .write_read(addr, &[register.as_byte()], &mut buf)
                .await?;
        }
        Ok(u16::from_be_bytes(buf))
    }
}

/// Driver for the INA219 converting register values into SI units
pub struct Ina219<P> {
    port: P,
    calibration: Calibration,
}

impl<I2C> Ina219<I2cRegisters<I2C>>
where
    I2C: I2c,
{
    /// Open the INA219 at `address` on the given I2C bus
    ///
    /// See [`Ina219::new`].
    ///
    /// # Errors
    /// If writing the configuration or calibration fails the error is returned together with the
    /// port wrapping the bus.
    pub async fn with_i2c(
        i2c: I2C,
        address: Address,
        calibration: Calibration,
        configuration: Configuration,
    ) -> Result<Self, InitializationError<I2cRegisters<I2C>, I2C::Error>> {
        Self::new(I2cRegisters::new(i2c, address), calibration, configuration).await
    }
}

impl<P> Ina219<P>
where
    P: RegisterPort,
{
    /// Create the driver, writing the configuration and then the calibration to the device
    ///
    /// # Errors
    /// If either write fails no driver is created. The error is returned together with the port.
    pub async fn new(
        port: P,
        calibration: Calibration,
        configuration: Configuration,
    ) -> Result<Self, InitializationError<P, P::Error>> {
        let mut new = Self::new_unchecked(port, calibration);

        match new.init(configuration).await {
            Ok(()) => {
                #[cfg(feature = "defmt")]
                defmt::info!(
                    "INA219 initialized, configuration {=u16:#x}, calibration {=u16}",
                    configuration.as_bits(),
                    new.calibration.register_bits()
                );
                Ok(new)
            }
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("INA219 initialization failed");
                Err(InitializationError::new(e, new.destroy()))
            }
        }
    }

    async fn init(&mut self, configuration: Configuration) -> Result<(), P::Error> {
        self.configure(configuration).await?;
        self.port
            .write_register(
                RegisterAddress::Calibration,
                self.calibration.register_bits(),
            )
            .await
    }

    /// Create the driver assuming the device already holds the matching configuration and
    /// calibration
    ///
    /// Nothing is written to the device.
    pub const fn new_unchecked(port: P, calibration: Calibration) -> Self {
        Self { port, calibration }
    }

    /// Destroy the driver returning the register port
    ///
    /// This does leave the device in its current state.
    pub fn destroy(self) -> P {
        self.port
    }

    /// Mutable access to the register port
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// The calibration this driver was created with
    pub const fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Write a new [`Configuration`], the calibration stays untouched
    ///
    /// # Errors
    /// Returns an error if the register write failed.
    pub async fn configure(&mut self, configuration: Configuration) -> Result<(), P::Error> {
        self.port
            .write_register(RegisterAddress::Configuration, configuration.as_bits())
            .await
    }

    /// Read the current [`Configuration`] back from the device
    ///
    /// # Errors
    /// Returns an error if the register read failed.
    pub async fn configuration(&mut self) -> Result<Configuration, P::Error> {
        let bits = self
            .port
            .read_register(RegisterAddress::Configuration)
            .await?;
        Ok(Configuration::from_bits(bits))
    }

    /// Read the shunt voltage in V
    ///
    /// # Errors
    /// Returns an error if the register read failed.
    pub async fn shunt_voltage(&mut self) -> Result<f64, P::Error> {
        Ok(self.shunt_voltage_register().await?.shunt_voltage_v())
    }

    /// Read the raw shunt voltage register
    ///
    /// # Errors
    /// Returns an error if the register read failed.
    pub async fn shunt_voltage_register(&mut self) -> Result<ShuntVoltage, P::Error> {
        let value = self
            .port
            .read_signed_register(RegisterAddress::ShuntVoltage)
            .await?;
        Ok(ShuntVoltage::from_10uv(value))
    }

    /// Read the bus voltage in V
    ///
    /// The conversion ready and math overflow flags are discarded.
    ///
    /// # Errors
    /// Returns an error if the register read failed.
    pub async fn bus_voltage(&mut self) -> Result<f64, P::Error> {
        Ok(self.bus_voltage_register().await?.voltage_v())
    }

    /// Read the raw bus voltage register including its flags
    ///
    /// # Errors
    /// Returns an error if the register read failed.
    pub async fn bus_voltage_register(&mut self) -> Result<BusVoltage, P::Error> {
        let value = self.port.read_register(RegisterAddress::BusVoltage).await?;
        Ok(BusVoltage::from_bits(value))
    }

    /// Read the current in A
    ///
    /// # Errors
    /// Returns an error if the register read failed.
    pub async fn current(&mut self) -> Result<f64, P::Error> {
        let value = self
            .port
            .read_signed_register(RegisterAddress::Current)
            .await?;
        Ok(self.calibration.current_from_register(value))
    }

    /// Read the power in W
    ///
    /// Reading the power register clears the conversion ready flag.
    ///
    /// # Errors
    /// Returns an error if the register read failed.
    pub async fn power(&mut self) -> Result<f64, P::Error> {
        let value = self.port.read_register(RegisterAddress::Power).await?;
        Ok(self.calibration.power_from_register(value))
    }

    /// Read all four measurements
    ///
    /// The bus voltage is read first so its flags belong to the same conversion as the other
    /// values.
    ///
    /// # Errors
    /// Returns an error if any of the register reads failed.
    pub async fn measurements(&mut self) -> Result<Measurements, P::Error> {
        let bus_voltage = self.bus_voltage_register().await?;
        let shunt_voltage = self.shunt_voltage_register().await?;
        let current_a = self.current().await?;
        let power_w = self.power().await?;

        Ok(Measurements {
            bus_voltage_v: bus_voltage.voltage_v(),
            shunt_voltage_v: shunt_voltage.shunt_voltage_v(),
            current_a,
            power_w,
            math_overflow: bus_voltage.has_math_overflowed(),
        })
    }
}
