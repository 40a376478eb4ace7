use super::*;
use std::sync::atomic::AtomicUsize;
use std::sync::mpsc;

#[test]
fn ui_tasks_wait_for_the_owner_to_drain() {
    let executor = StdTaskExecutor::new(0);
    let counter = Arc::new(AtomicUsize::new(0));
    for _ in 0..3 {
        let counter = Arc::clone(&counter);
        assert!(executor.post_task(
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
            TaskType::Ui,
        ));
    }
    assert_eq!(counter.load(Ordering::SeqCst), 0);
    assert!(executor.has_pending_ui_tasks());
    assert_eq!(executor.run_ui_tasks(), 3);
    assert_eq!(counter.load(Ordering::SeqCst), 3);
}

#[test]
fn without_workers_background_tasks_run_on_ui_queue() {
    let executor = StdTaskExecutor::new(0);
    assert!(executor.will_run_on_current_thread(TaskType::Background));
    let (sender, receiver) = mpsc::channel();
    executor.post_task(
        Box::new(move || {
            sender.send(thread::current().id()).expect("receiver alive");
        }),
        TaskType::Background,
    );
    executor.run_ui_tasks();
    assert_eq!(receiver.try_recv().ok(), Some(thread::current().id()));
}

#[test]
fn background_result_is_posted_back_to_ui_queue() {
    let executor = StdTaskExecutor::new(2);
    assert_eq!(executor.worker_count(), 2);
    let handle: Arc<dyn TaskExecutor> = executor.clone();
    let (done_sender, done_receiver) = mpsc::channel();
    let committed = Arc::new(AtomicBool::new(false));
    let committed_by_ui = Arc::clone(&committed);

    executor.post_task(
        Box::new(move || {
            let on_worker = handle.will_run_on_current_thread(TaskType::Background);
            handle.post_task(
                Box::new(move || committed_by_ui.store(on_worker, Ordering::SeqCst)),
                TaskType::Ui,
            );
            done_sender.send(()).expect("receiver alive");
        }),
        TaskType::Background,
    );

    done_receiver
        .recv_timeout(Duration::from_secs(5))
        .expect("worker ran the task");
    assert!(!committed.load(Ordering::SeqCst));
    assert_eq!(executor.run_ui_tasks(), 1);
    assert!(committed.load(Ordering::SeqCst));
}

#[test]
fn delayed_tasks_wait_for_their_deadline() {
    let executor = StdTaskExecutor::new(0);
    let ran = Arc::new(AtomicUsize::new(0));
    let later = Arc::clone(&ran);
    let now = Arc::clone(&ran);
    executor.post_delayed_task(
        Box::new(move || {
            later.fetch_add(10, Ordering::SeqCst);
        }),
        TaskType::Ui,
        60_000,
    );
    executor.post_delayed_task(
        Box::new(move || {
            now.fetch_add(1, Ordering::SeqCst);
        }),
        TaskType::Ui,
        0,
    );
    executor.run_ui_tasks();
    assert_eq!(ran.load(Ordering::SeqCst), 1);
    assert!(executor.has_delayed_tasks());
}

#[test]
fn posts_after_shutdown_are_rejected() {
    let executor = StdTaskExecutor::new(1);
    executor.shutdown();
    assert_eq!(executor.worker_count(), 0);
    assert!(!executor.post_task(Box::new(|| {}), TaskType::Ui));
    assert!(!executor.post_delayed_task(Box::new(|| {}), TaskType::Background, 5));
}

#[test]
fn scheduler_records_and_wakes() {
    let scheduler = StdScheduler::new();
    let woken = Arc::new(AtomicUsize::new(0));
    let wake_count = Arc::clone(&woken);
    scheduler.set_frame_waker(move || {
        wake_count.fetch_add(1, Ordering::SeqCst);
    });
    scheduler.schedule_frame();
    assert!(scheduler.take_frame_request());
    assert!(!scheduler.take_frame_request());
    assert_eq!(woken.load(Ordering::SeqCst), 1);
    scheduler.clear_frame_waker();
    scheduler.schedule_frame();
    assert_eq!(woken.load(Ordering::SeqCst), 1);
}
