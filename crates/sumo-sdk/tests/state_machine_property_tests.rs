//! 状态机性质测试
//!
//! 随机的信号与传感器序列下检查状态转换的不变量。

mod common;

use common::Bench;
use proptest::prelude::*;
use sumo_sdk::control::MachineParams;
use sumo_sdk::protocol::{PendingSignals, RobotState};

#[derive(Debug, Clone, Copy)]
enum Step {
    Start,
    Stop,
    Boundary(bool, bool),
    Opponent(Option<u16>, Option<u16>),
    Idle,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        2 => Just(Step::Start),
        1 => Just(Step::Stop),
        2 => (any::<bool>(), any::<bool>()).prop_map(|(l, r)| Step::Boundary(l, r)),
        2 => (proptest::option::of(0u16..2000), proptest::option::of(0u16..2000))
            .prop_map(|(l, r)| Step::Opponent(l, r)),
        3 => Just(Step::Idle),
    ]
}

fn apply(bench: &mut Bench, step: Step) {
    match step {
        Step::Start => bench.start(),
        Step::Stop => bench.stop(),
        Step::Boundary(left, right) => bench.hw.set_boundary(left, right),
        Step::Opponent(left, right) => bench.hw.set_distances(left, right),
        Step::Idle => {},
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn transitions_respect_state_graph(steps in proptest::collection::vec(step(), 1..120)) {
        let mut bench = Bench::new(MachineParams {
            sweep_window_ticks: 4,
            ..MachineParams::default()
        });

        for step in steps {
            let before = bench.machine.state();
            let stop_posted = matches!(step, Step::Stop);
            apply(&mut bench, step);
            let after = bench.tick();

            // Idle 只能去 Searching / Countdown（或保持）
            if before == RobotState::Idle {
                prop_assert!(
                    matches!(after, RobotState::Idle | RobotState::Searching | RobotState::Countdown),
                    "Idle -> {}", after
                );
            }
            // Attacking 只能由 Searching / Attacking 进入
            if after == RobotState::Attacking {
                prop_assert!(
                    matches!(before, RobotState::Searching | RobotState::Attacking),
                    "{} -> Attacking", before
                );
            }
            // 逃逸只能从活动状态开始
            if after == RobotState::Turning && before != RobotState::Turning {
                prop_assert!(before.accepts_escape(), "{} -> Turning", before);
            }
            // 停止请求在下一个 tick 生效（边线守卫抢先时再等一个 tick）
            if stop_posted && after != RobotState::Idle {
                prop_assert_eq!(after, RobotState::Turning);
                prop_assert_eq!(bench.tick(), RobotState::Idle);
            }
        }
    }

    #[test]
    fn stop_is_idempotent_after_any_history(
        steps in proptest::collection::vec(step(), 0..60),
        repeats in 1usize..6,
    ) {
        let mut bench = Bench::with_defaults();
        for step in steps {
            apply(&mut bench, step);
            bench.tick();
        }

        bench.hw.set_boundary(false, false);
        bench.stop();
        bench.tick();
        if bench.machine.state() != RobotState::Idle {
            bench.stop();
            bench.tick();
        }
        prop_assert_eq!(bench.machine.state(), RobotState::Idle);
        bench.hw.take_calls();

        for _ in 0..repeats {
            bench.mailbox.post(PendingSignals::STOP_REQUESTED);
            prop_assert_eq!(bench.tick(), RobotState::Idle);
        }
        prop_assert!(bench.hw.calls().is_empty());
    }
}
