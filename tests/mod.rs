use nalgebra::*;
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use ::scw::fit::{Scw, Update};
use ::scw::linalg::{dot, is_symmetric};
use ::scw::sample::{Example, Label};
use ::scw::table::Table;

const SEPARABLE : &'static str = "1,1,-1,-1,1,-1\n2,1,-1,-2,0.5,-1\n1,3,-2,-1,2,0.5\n";

fn label(positive : bool) -> Label {
    if positive { Label::Positive } else { Label::Negative }
}

fn examples_strategy() -> impl Strategy<Value=Vec<Example>> {
    (1usize..5).prop_flat_map(|d| {
        prop::collection::vec((prop::collection::vec(-5.0f64..5.0, d), any::<bool>()), 1..30)
    }).prop_map(|exs| {
        exs.into_iter()
            .map(|(x, y)| Example::new(DVector::from_vec(x), label(y)) )
            .collect()
    })
}

/// Trains over the examples, returning the trajectory of mean vectors notified at each update.
fn trajectory(scw : &mut Scw, exs : &[Example]) -> Vec<DVector<f64>> {
    let mut traj = Vec::new();
    scw.train_with(exs, &mut |u : &Update<'_>| traj.push(u.mu.clone()) ).unwrap();
    traj
}

proptest! {

    #[test]
    fn step_invariants(exs in examples_strategy(), c in 0.05f64..5.0, eta in 0.01f64..0.99) {
        let mut scw = Scw::new(c, eta).unwrap();
        for ex in exs.iter() {
            let prev = scw.mean().zip(scw.covariance()).map(|(m, s)| (m.clone(), s.clone()) );
            let step = scw.step(&ex.x, ex.y).unwrap();
            prop_assert!(step.alpha >= 0.0 && step.alpha <= c);
            let sigma = scw.covariance().unwrap();
            prop_assert!(is_symmetric(sigma, 1E-12));
            if !step.updated() {
                if let Some((mu, sigma)) = prev {
                    prop_assert_eq!(scw.mean().unwrap(), &mu);
                    prop_assert_eq!(scw.covariance().unwrap(), &sigma);
                }
            }
        }
    }

    #[test]
    fn prediction_is_sign_of_margin(exs in examples_strategy(), eta in 0.01f64..0.99) {
        let mut scw = Scw::new(1.0, eta).unwrap();
        scw.train(&exs[..]).unwrap();
        let mu = scw.mean().unwrap().clone();
        for ex in exs.iter() {
            let p = scw.predict(&ex.x).unwrap();
            let s = dot(&mu, &ex.x).unwrap();
            prop_assert!(p == -1 || p == 0 || p == 1);
            let expected = if s < 0.0 { -1 } else if s == 0.0 { 0 } else { 1 };
            prop_assert_eq!(p, expected);
        }
    }

    #[test]
    fn training_is_deterministic(exs in examples_strategy(), c in 0.05f64..5.0, eta in 0.01f64..0.99) {
        let mut first = Scw::new(c, eta).unwrap();
        let mut second = Scw::new(c, eta).unwrap();
        let traj_first = trajectory(&mut first, &exs[..]);
        let traj_second = trajectory(&mut second, &exs[..]);
        prop_assert_eq!(traj_first, traj_second);
        prop_assert_eq!(first.mean(), second.mean());
        prop_assert_eq!(first.covariance(), second.covariance());
    }

}

#[test]
fn order_changes_learned_mean() {
    let a = Example::from_slice(&[1.0, 0.0], 1).unwrap();
    let b = Example::from_slice(&[1.0, 1.0], -1).unwrap();
    let mut ab = Scw::new(1.0, 0.9).unwrap();
    ab.train(&[a.clone(), b.clone()]).unwrap();
    let mut ba = Scw::new(1.0, 0.9).unwrap();
    ba.train(&[b, a]).unwrap();
    assert_eq!(ab.updates(), 2);
    assert_eq!(ba.updates(), 2);
    assert_ne!(ab.mean(), ba.mean());
}

#[test]
fn separable_table() {
    let tbl : Table = SEPARABLE.parse().unwrap();
    let exs = tbl.examples();
    let mut scw = Scw::new(1.0, 0.9).unwrap();
    let traj = trajectory(&mut scw, &exs[..]);
    assert_eq!(traj.len(), 4);
    assert_eq!(scw.examples_seen(), 6);
    let eval = scw.test(&exs[..]).unwrap();
    assert_eq!(eval.mismatches, 0);
    assert_eq!(format!("{}", eval), "error rate = 0 / 6");
}

#[test]
fn repeated_training_continues_from_current_state() {
    let exs = SEPARABLE.parse::<Table>().unwrap().examples();
    let mut once = Scw::new(1.0, 0.9).unwrap();
    once.train(&exs[..]).unwrap();
    let mut twice = Scw::new(1.0, 0.9).unwrap();
    twice.train(&exs[..3]).unwrap();
    twice.train(&exs[3..]).unwrap();
    assert_eq!(once.mean(), twice.mean());
    assert_eq!(once.covariance(), twice.covariance());
}

#[test]
fn gaussian_separable_sample() {
    let mut rng = StdRng::seed_from_u64(17);
    let w = DVector::from_column_slice(&[1.0, -2.0, 0.5]);
    let exs : Vec<Example> = (0..500).map(|_| {
        let x = DVector::from_fn(3, |_, _| rng.sample::<f64, _>(rand_distr::StandardNormal) );
        let y = label(w.dot(&x) >= 0.0);
        Example::new(x, y)
    }).collect();
    let (train, held_out) = exs.split_at(400);
    let mut scw = Scw::new(1.0, 0.9).unwrap();
    scw.train(train).unwrap();
    let eval = scw.test(held_out).unwrap();
    assert_eq!(eval.total, 100);
    assert!(eval.rate().unwrap() < 0.15, "{}", eval);
    let cov = scw.covariance().unwrap();
    assert!(is_symmetric(cov, 1E-12));
    assert!(cov.diagonal().iter().all(|v| *v > 0.0 && *v < 1.0 ));
}
