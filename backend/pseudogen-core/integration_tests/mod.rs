mod completion;
mod helpers;
mod input;
