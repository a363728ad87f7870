#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RegistryMetrics {
    pub trees_registered: usize,
    pub routes_registered: usize,
    pub rejected: usize,
}

impl RegistryMetrics {
    pub fn record_insert(&mut self, routes: usize) {
        self.trees_registered += 1;
        self.routes_registered += routes;
    }

    pub fn record_rejection(&mut self) {
        self.rejected += 1;
    }
}
