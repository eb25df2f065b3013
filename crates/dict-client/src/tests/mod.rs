//! Behavioural tests driving the client against the fake DICT server.
