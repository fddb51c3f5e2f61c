mod helpers;
mod pipeline;
mod run;
