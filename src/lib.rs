pub mod graph {
    pub mod functionerror;
    pub mod integrationscheme;
    pub mod piecewisefunction;
    pub mod vectorfunction;
}

pub mod physics {
    pub mod animatedbody;
    pub mod body;
    pub mod bodyreplay;
    pub mod corrections;
    pub mod force;
    pub mod gravity;
    pub mod pendulum;
    pub mod pendulumtension;
    pub mod physicserror;
    pub mod trajectoryrecord;
}
