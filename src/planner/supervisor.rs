use crate::planner::{AntStatus, Message};

use csv::Writer;
use log::{debug, warn};
use serde::Serialize;
use std::io::{sink, Sink, Write};
use std::sync::mpsc;
use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

/// One row of run statistics, written per generation.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GenerationRecord {
    pub generation: usize,
    pub alpha: f64,
    pub beta: f64,
    pub reached_goal: usize,
    pub step_limited: usize,
    pub failed: usize,
    pub mean_steps: f64,
    pub generation_best: f64,
    pub best_length: f64,
    pub pheromone_edges: usize,
    pub cpu_time_ms: f64,
}

/// Exponents and results of a generation, as known to the planner.
#[derive(Debug, Clone, Copy)]
pub struct GenerationSummary {
    pub generation: usize,
    pub alpha: f64,
    pub beta: f64,
    pub best_length: f64,
    pub pheromone_edges: usize,
}

/// Collects ant messages and turns them into per generation statistics.
pub struct Supervisor<W: Write> {
    pub sender: Sender<Message>,
    receiver: Receiver<Message>,
    ants: usize,
    history: Vec<GenerationRecord>,
    writer: Writer<W>,
}

impl<W: Write> Supervisor<W> {
    pub fn new(writer: Writer<W>) -> Self {
        let (tx, rx) = mpsc::channel();
        Supervisor {
            sender: tx,
            receiver: rx,
            ants: 0,
            history: Vec::new(),
            writer,
        }
    }

    pub fn new_ant(&mut self) -> (Sender<Message>, usize) {
        self.ants += 1;
        let id = self.ants;

        (self.sender.clone(), id)
    }

    /// Drains all messages sent since the last call and records the generation.
    pub fn aggregate(&mut self, summary: GenerationSummary) -> &GenerationRecord {
        let mut record = GenerationRecord {
            generation: summary.generation,
            alpha: summary.alpha,
            beta: summary.beta,
            reached_goal: 0,
            step_limited: 0,
            failed: 0,
            mean_steps: 0.0,
            generation_best: f64::INFINITY,
            best_length: summary.best_length,
            pheromone_edges: summary.pheromone_edges,
            cpu_time_ms: 0.0,
        };

        let mut messages = 0;
        let mut steps = 0;
        let mut cpu_time = Duration::default();
        for message in self.receiver.try_iter() {
            if message.generation != summary.generation {
                debug!(
                    "dropping message of ant {} from generation {}",
                    message.id(),
                    message.generation
                );
                continue;
            }
            messages += 1;
            steps += message.steps;
            cpu_time += message.cpu_time;
            match message.status {
                AntStatus::ReachedGoal => record.reached_goal += 1,
                AntStatus::StepLimitExceeded => record.step_limited += 1,
                AntStatus::Failed | AntStatus::Constructing => record.failed += 1,
            }
            if message.status != AntStatus::Failed && message.cost < record.generation_best {
                record.generation_best = message.cost;
            }
        }
        if messages > 0 {
            record.mean_steps = steps as f64 / messages as f64;
        }
        record.cpu_time_ms = cpu_time.as_secs_f64() * 1000.0;

        if let Err(error) = self.writer.serialize(&record) {
            warn!("could not write statistics: {}", error);
        }
        self.history.push(record);
        self.ants = 0;

        // history is never empty after the push above
        &self.history[self.history.len() - 1]
    }

    pub fn history(&self) -> &[GenerationRecord] {
        &self.history
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

impl Default for Supervisor<Sink> {
    fn default() -> Self {
        Supervisor::new(Writer::from_writer(sink()))
    }
}
