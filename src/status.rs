use crate::registers::CanStat;

/// Flags returned by the READ STATUS instruction
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ControllerStatus {
    /// Receive buffer 0 holds a new message (RX0IF)
    pub rx0_full: bool,
    /// Receive buffer 1 holds a new message (RX1IF)
    pub rx1_full: bool,
    /// Transmission of buffer 0 pending (TXB0CTRL.TXREQ)
    pub tx0_pending: bool,
    /// Buffer 0 transmitted (TX0IF)
    pub tx0_done: bool,
    /// Transmission of buffer 1 pending (TXB1CTRL.TXREQ)
    pub tx1_pending: bool,
    /// Buffer 1 transmitted (TX1IF)
    pub tx1_done: bool,
    /// Transmission of buffer 2 pending (TXB2CTRL.TXREQ)
    pub tx2_pending: bool,
    /// Buffer 2 transmitted (TX2IF)
    pub tx2_done: bool,
}

impl ControllerStatus {
    pub(crate) fn from_register(register: u8) -> Self {
        Self {
            rx0_full: register & 1 != 0,
            rx1_full: register & (1 << 1) != 0,
            tx0_pending: register & (1 << 2) != 0,
            tx0_done: register & (1 << 3) != 0,
            tx1_pending: register & (1 << 4) != 0,
            tx1_done: register & (1 << 5) != 0,
            tx2_pending: register & (1 << 6) != 0,
            tx2_done: register & (1 << 7) != 0,
        }
    }
}

/// Receive state returned by the RX STATUS instruction
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ReceiveStatus {
    /// Message waiting in receive buffer 0
    pub rx0_full: bool,
    /// Message waiting in receive buffer 1
    pub rx1_full: bool,
    /// Received message uses an extended identifier
    pub extended: bool,
    /// Received message is a remote frame
    pub remote: bool,
    /// Index of the acceptance filter which matched (0-5),
    /// values 6 and 7 denote a rollover of filter 0 or 1 into RXB1
    pub filter_hit: u8,
}

impl ReceiveStatus {
    pub(crate) fn from_register(register: u8) -> Self {
        Self {
            rx0_full: register & (1 << 6) != 0,
            rx1_full: register & (1 << 7) != 0,
            extended: register & (1 << 4) != 0,
            remote: register & (1 << 3) != 0,
            filter_hit: register & 0b111,
        }
    }
}

/// Operation status read from CANSTAT register
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OperationStatus {
    /// Current operation mode, `None` for reserved bit patterns
    pub mode: Option<OperationMode>,

    /// Highest priority pending interrupt
    pub interrupt: InterruptCode,
}

impl OperationStatus {
    pub(crate) fn from_register(register: u8) -> Self {
        let canstat = CanStat::from(register);

        Self {
            mode: OperationMode::from_bits(canstat.opmod()),
            interrupt: InterruptCode::from_bits(canstat.icod()),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OperationMode {
    /// Module sends and receives on the bus
    Normal = 0b000,
    /// Module is in sleep mode
    Sleep = 0b001,
    /// Transmitted messages are looped back internally
    Loopback = 0b010,
    /// Module only receives, no acknowledgement
    ListenOnly = 0b011,
    /// Module is in configuration mode
    Configuration = 0b100,
}

impl OperationMode {
    pub(crate) fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0b000 => Some(Self::Normal),
            0b001 => Some(Self::Sleep),
            0b010 => Some(Self::Loopback),
            0b011 => Some(Self::ListenOnly),
            0b100 => Some(Self::Configuration),
            _ => None,
        }
    }

    /// Value of the REQOP bits in CANCTRL
    pub(crate) fn as_reqop(&self) -> u8 {
        (*self as u8) << 5
    }
}

/// Interrupt flag code (CANSTAT.ICOD)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InterruptCode {
    None = 0b000,
    Error = 0b001,
    WakeUp = 0b010,
    Txb0 = 0b011,
    Txb1 = 0b100,
    Txb2 = 0b101,
    Rxb0 = 0b110,
    Rxb1 = 0b111,
}

impl InterruptCode {
    pub(crate) fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0b000 => Self::None,
            0b001 => Self::Error,
            0b010 => Self::WakeUp,
            0b011 => Self::Txb0,
            0b100 => Self::Txb1,
            0b101 => Self::Txb2,
            0b110 => Self::Rxb0,
            _ => Self::Rxb1,
        }
    }
}
