/// Named timer classes. Order matters: it is the index into every fixed
/// array in `Metrics`, and it is the order columns appear in the table
/// printed by `dump`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum TimerClass {
    Initializing = 0,
    WaitingSendLeft,
    WaitingSendLeftMpi,
    WaitingSendLeftCopy,
    WaitingRecvLeft,
    WaitingRecvLeftMpi,
    WaitingRecvLeftCopy,
    WaitingSendRight,
    WaitingSendRightMpi,
    WaitingSendRightCopy,
    WaitingRecvRight,
    WaitingRecvRightMpi,
    WaitingRecvRightCopy,
    GrindingBasecase,
    GrindingChain,
    GatherCommunication,
    Active,
}

pub const TIMER_CLASS_COUNT: usize = 17;

pub const TIMER_CLASS_NAMES: [&str; TIMER_CLASS_COUNT] = [
    "initializing",
    "waiting_send_left",
    "waiting_send_left_mpi",
    "waiting_send_left_copy",
    "waiting_recv_left",
    "waiting_recv_left_mpi",
    "waiting_recv_left_copy",
    "waiting_send_right",
    "waiting_send_right_mpi",
    "waiting_send_right_copy",
    "waiting_recv_right",
    "waiting_recv_right_mpi",
    "waiting_recv_right_copy",
    "grinding_basecase",
    "grinding_chain",
    "gather_communication",
    "active",
];

impl TimerClass {
    pub const ALL: [TimerClass; TIMER_CLASS_COUNT] = [
        TimerClass::Initializing,
        TimerClass::WaitingSendLeft,
        TimerClass::WaitingSendLeftMpi,
        TimerClass::WaitingSendLeftCopy,
        TimerClass::WaitingRecvLeft,
        TimerClass::WaitingRecvLeftMpi,
        TimerClass::WaitingRecvLeftCopy,
        TimerClass::WaitingSendRight,
        TimerClass::WaitingSendRightMpi,
        TimerClass::WaitingSendRightCopy,
        TimerClass::WaitingRecvRight,
        TimerClass::WaitingRecvRightMpi,
        TimerClass::WaitingRecvRightCopy,
        TimerClass::GrindingBasecase,
        TimerClass::GrindingChain,
        TimerClass::GatherCommunication,
        TimerClass::Active,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        TIMER_CLASS_NAMES[self.index()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum CounterClass {
    MessagesReceivedRight = 0,
    MessagesReceivedRightNonempty,
}

pub const COUNTER_CLASS_COUNT: usize = 2;

pub const COUNTER_CLASS_NAMES: [&str; COUNTER_CLASS_COUNT] =
    ["messages_received_right", "messages_received_right_nonempty"];

impl CounterClass {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        COUNTER_CLASS_NAMES[self.index()]
    }
}
