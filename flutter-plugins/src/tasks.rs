//! Same-thread deferred callbacks.
//!
//! Tasks are only ever run from [`TaskRunner::execute_tasks`], which the
//! embedder calls from its UI loop, so a task posted while handling an event
//! runs on a later turn of the loop rather than inside the current dispatch.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::time::Instant;

use log::trace;
use priority_queue::PriorityQueue;

pub type UiTask = Box<dyn FnOnce()>;

struct TaskRunnerInner {
    next_order: u64,
    tasks: PriorityQueue<Task, TaskPriority>,
}

#[derive(Clone)]
pub struct TaskRunner {
    inner: Rc<RefCell<TaskRunnerInner>>,
}

impl Default for TaskRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskRunner {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(TaskRunnerInner {
                next_order: 0,
                tasks: PriorityQueue::new(),
            })),
        }
    }

    /// Run `task` on the next turn of the UI loop.
    pub fn post_next_frame<F>(&self, task: F)
    where
        F: FnOnce() + 'static,
    {
        self.post_task(task, Instant::now());
    }

    fn post_task<F>(&self, task: F, time: Instant)
    where
        F: FnOnce() + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let order = inner.next_order;
        inner.next_order += 1;
        trace!("posting task {}", order);
        inner.tasks.push(
            Task {
                order,
                task: Box::new(task),
            },
            TaskPriority { time, order },
        );
    }

    pub fn has_pending_tasks(&self) -> bool {
        !self.inner.borrow().tasks.is_empty()
    }

    /// Runs every task due at `now` and returns when the next one is due.
    pub fn execute_tasks(&self, now: Instant) -> Option<Instant> {
        let mut expired_tasks = Vec::new();
        {
            let mut inner = self.inner.borrow_mut();
            while let Some((_, priority)) = inner.tasks.peek() {
                if priority.time > now {
                    break;
                }
                if let Some((task, _)) = inner.tasks.pop() {
                    expired_tasks.push(task);
                }
            }
        }

        // the queue must not be borrowed while running, tasks may post again
        for task in expired_tasks {
            trace!("running task {}", task.order);
            (task.task)();
        }

        self.inner
            .borrow()
            .tasks
            .peek()
            .map(|(_, priority)| priority.time)
    }
}

#[derive(Eq, PartialEq)]
struct TaskPriority {
    time: Instant,
    order: u64,
}

// PriorityQueue pops the greatest priority first, so earlier is greater.
impl Ord for TaskPriority {
    fn cmp(&self, other: &Self) -> Ordering {
        match other.time.cmp(&self.time) {
            Ordering::Equal => other.order.cmp(&self.order),
            ord => ord,
        }
    }
}

impl PartialOrd for TaskPriority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

struct Task {
    order: u64,
    task: UiTask,
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl Eq for Task {}

impl Hash for Task {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.order.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tasks_run_in_post_order() {
        let runner = TaskRunner::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for i in 0..3 {
            let log = log.clone();
            runner.post_next_frame(move || log.borrow_mut().push(i));
        }
        assert!(log.borrow().is_empty());

        let next = runner.execute_tasks(Instant::now());
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
        assert!(next.is_none());
        assert!(!runner.has_pending_tasks());
    }

    #[test]
    fn test_task_posted_while_running_waits() {
        let runner = TaskRunner::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let runner2 = runner.clone();
            let log = log.clone();
            runner.post_next_frame(move || {
                log.borrow_mut().push("outer");
                let log = log.clone();
                runner2.post_next_frame(move || log.borrow_mut().push("inner"));
            });
        }

        let now = Instant::now();
        runner.execute_tasks(now);
        assert_eq!(*log.borrow(), vec!["outer"]);
        runner.execute_tasks(Instant::now());
        assert_eq!(*log.borrow(), vec!["outer", "inner"]);
    }
}
