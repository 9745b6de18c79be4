mod fallback;
mod helpers;
