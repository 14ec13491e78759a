use super::*;
use crate::components::sidebar::active_nav;

#[test]
fn every_quick_link_targets_a_nav_route() {
    for (path, _, _) in QUICK_LINKS {
        assert_eq!(active_nav(path), Some(path), "{path}");
    }
}
