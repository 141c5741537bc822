use crate::Transport;
use hydra_core::{export_limbs_le, import_limbs_le, BigUint};
use hydra_metrics::{Metrics, TimerClass};
use std::sync::mpsc::{self, Receiver, SyncSender};

/// A `Transport` backed by in-process rendezvous channels between adjacent
/// ranks, plus a shared many-to-one channel for `gather`.
pub struct ChannelTransport {
    rank: u32,
    world_size: u32,
    left_tx: Option<SyncSender<Vec<u64>>>,
    left_rx: Option<Receiver<Vec<u64>>>,
    right_tx: Option<SyncSender<Vec<u64>>>,
    right_rx: Option<Receiver<Vec<u64>>>,
    gather_tx: mpsc::Sender<(u32, Vec<u64>)>,
    gather_rx: Option<Receiver<(u32, Vec<u64>)>>,
}

/// Builds `world_size` linked transports, one per rank, wired as a linear
/// chain (rank `r`'s "left" neighbour is `r + 1`, its "right" neighbour is
/// `r - 1`, with rank 0 as base and rank `world_size - 1` as top) plus a
/// shared gather channel rooted at rank 0.
pub fn build_chain(world_size: u32) -> Vec<ChannelTransport> {
    assert!(world_size >= 1, "world_size must be positive");

    let mut left_tx: Vec<Option<SyncSender<Vec<u64>>>> = (0..world_size).map(|_| None).collect();
    let mut left_rx: Vec<Option<Receiver<Vec<u64>>>> = (0..world_size).map(|_| None).collect();
    let mut right_tx: Vec<Option<SyncSender<Vec<u64>>>> = (0..world_size).map(|_| None).collect();
    let mut right_rx: Vec<Option<Receiver<Vec<u64>>>> = (0..world_size).map(|_| None).collect();

    for r in 0..world_size.saturating_sub(1) {
        // Channel A: r -> r+1, used by r's send_left / (r+1)'s recv_right.
        let (tx_a, rx_a) = mpsc::sync_channel::<Vec<u64>>(0);
        // Channel B: r+1 -> r, used by (r+1)'s send_right / r's recv_left.
        let (tx_b, rx_b) = mpsc::sync_channel::<Vec<u64>>(0);

        left_tx[r as usize] = Some(tx_a);
        right_rx[(r + 1) as usize] = Some(rx_a);
        right_tx[(r + 1) as usize] = Some(tx_b);
        left_rx[r as usize] = Some(rx_b);
    }

    let (gather_tx, gather_rx) = mpsc::channel::<(u32, Vec<u64>)>();

    (0..world_size)
        .map(|r| ChannelTransport {
            rank: r,
            world_size,
            left_tx: left_tx[r as usize].take(),
            left_rx: left_rx[r as usize].take(),
            right_tx: right_tx[r as usize].take(),
            right_rx: right_rx[r as usize].take(),
            gather_tx: gather_tx.clone(),
            gather_rx: if r == 0 { Some(gather_rx) } else { None },
        })
        .collect()
}

fn send_on(
    metrics: &mut Metrics,
    tx: &SyncSender<Vec<u64>>,
    x: &BigUint,
    outer: TimerClass,
    mpi: TimerClass,
    copy: TimerClass,
) {
    metrics.timer_start(outer);
    metrics.timer_start(copy);
    let limbs = export_limbs_le(x);
    metrics.timer_stop(copy);
    metrics.timer_start(mpi);
    if tx.send(limbs).is_err() {
        hydra_core::abort_transport("send: peer channel closed");
    }
    metrics.timer_stop(mpi);
    metrics.timer_stop(outer);
}

fn recv_on(
    metrics: &mut Metrics,
    rx: &Receiver<Vec<u64>>,
    outer: TimerClass,
    mpi: TimerClass,
    copy: TimerClass,
) -> BigUint {
    metrics.timer_start(outer);
    metrics.timer_start(mpi);
    let limbs = match rx.recv() {
        Ok(limbs) => limbs,
        Err(_) => hydra_core::abort_transport("recv: peer channel closed"),
    };
    metrics.timer_stop(mpi);
    metrics.timer_start(copy);
    let x = import_limbs_le(&limbs);
    metrics.timer_stop(copy);
    metrics.timer_stop(outer);
    x
}

impl Transport for ChannelTransport {
    fn send_left(&mut self, metrics: &mut Metrics, x: &BigUint) {
        let tx = self
            .left_tx
            .as_ref()
            .unwrap_or_else(|| hydra_core::abort_transport("send_left: top rank has no left neighbour"));
        send_on(
            metrics,
            tx,
            x,
            TimerClass::WaitingSendLeft,
            TimerClass::WaitingSendLeftMpi,
            TimerClass::WaitingSendLeftCopy,
        );
    }

    fn recv_left(&mut self, metrics: &mut Metrics) -> BigUint {
        let rx = self
            .left_rx
            .as_ref()
            .unwrap_or_else(|| hydra_core::abort_transport("recv_left: top rank has no left neighbour"));
        recv_on(
            metrics,
            rx,
            TimerClass::WaitingRecvLeft,
            TimerClass::WaitingRecvLeftMpi,
            TimerClass::WaitingRecvLeftCopy,
        )
    }

    fn send_right(&mut self, metrics: &mut Metrics, x: &BigUint) {
        let tx = self
            .right_tx
            .as_ref()
            .unwrap_or_else(|| hydra_core::abort_transport("send_right: base rank has no right neighbour"));
        send_on(
            metrics,
            tx,
            x,
            TimerClass::WaitingSendRight,
            TimerClass::WaitingSendRightMpi,
            TimerClass::WaitingSendRightCopy,
        );
    }

    fn recv_right(&mut self, metrics: &mut Metrics) -> BigUint {
        let rx = self
            .right_rx
            .as_ref()
            .unwrap_or_else(|| hydra_core::abort_transport("recv_right: base rank has no right neighbour"));
        recv_on(
            metrics,
            rx,
            TimerClass::WaitingRecvRight,
            TimerClass::WaitingRecvRightMpi,
            TimerClass::WaitingRecvRightCopy,
        )
    }

    fn gather(&mut self, metrics: &mut Metrics, item: &BigUint, root: u32) -> Option<Vec<BigUint>> {
        metrics.timer_start(TimerClass::GatherCommunication);
        let limbs = export_limbs_le(item);
        if self.gather_tx.send((self.rank, limbs)).is_err() {
            hydra_core::abort_transport("gather: channel closed");
        }
        let result = if self.rank == root {
            let rx = self
                .gather_rx
                .as_ref()
                .expect("root rank must hold the gather receiver");
            let mut buf: Vec<Option<BigUint>> = (0..self.world_size).map(|_| None).collect();
            let mut remaining = self.world_size as usize;
            while remaining > 0 {
                let (r, limbs) = match rx.recv() {
                    Ok(pair) => pair,
                    Err(_) => hydra_core::abort_transport("gather: channel closed before all ranks reported"),
                };
                buf[r as usize] = Some(import_limbs_le(&limbs));
                remaining -= 1;
            }
            Some(
                buf.into_iter()
                    .map(|v| v.expect("every rank must contribute to the gather"))
                    .collect(),
            )
        } else {
            None
        };
        metrics.timer_stop(TimerClass::GatherCommunication);
        result
    }
}
